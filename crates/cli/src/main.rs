use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use gazeshift_core::cursor::domain::cursor_relocator::CursorRelocator;
use gazeshift_core::cursor::domain::display_layout::DisplayLayout;
use gazeshift_core::cursor::infrastructure::layout_cursor_relocator::LayoutCursorRelocator;
use gazeshift_core::cursor::infrastructure::recording_cursor_warp::RecordingCursorWarp;
use gazeshift_core::gesture::domain::gaze_meter::GazeMeter;
use gazeshift_core::gesture::domain::gesture_command::{DisplaySide, EnabledDirections};
use gazeshift_core::session::drive_cursor_use_case::DriveCursorUseCase;
use gazeshift_core::session::session_executor::{GestureEvent, SessionReport};
use gazeshift_core::session::session_logger::StdoutSessionLogger;
use gazeshift_core::session::infrastructure::threaded_gaze_session::ThreadedGazeSession;
use gazeshift_core::shared::constants::{DEFAULT_DISPLAY_HEIGHT, DEFAULT_DISPLAY_WIDTH};
use gazeshift_core::trace::infrastructure::jsonl_trace_source::JsonlTraceSource;

/// Replay a recorded gaze trace and report where the cursor would move.
#[derive(Parser)]
#[command(name = "gazeshift")]
struct Cli {
    /// Gaze trace in JSON Lines form: {"t": <seconds>, "x": <0.0-1.0 | null>}.
    trace: PathBuf,

    /// Display layout JSON ({"displays": [{"id", "x", "y", "width", "height"}]}).
    /// Defaults to two 1920x1080 displays side by side.
    #[arg(long)]
    displays: Option<PathBuf>,

    /// Enabled movement directions: both, left or right.
    #[arg(long, default_value = "both")]
    directions: String,

    /// Print a gaze meter line for every frame.
    #[arg(long)]
    meter: bool,

    /// Log progress every N frames.
    #[arg(long, default_value = "300")]
    log_every: usize,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let enabled = parse_directions(&cli.directions)?;
    let layout = load_layout(cli.displays.as_deref())?;
    log::info!(
        "Replaying {} across {} display(s)",
        cli.trace.display(),
        layout.displays().len()
    );

    let warp = RecordingCursorWarp::new();
    let relocator: Box<dyn CursorRelocator> =
        Box::new(LayoutCursorRelocator::new(layout.clone(), Box::new(warp.clone())));
    let source = Box::new(JsonlTraceSource::open(&cli.trace)?);

    let meter = cli.meter.then(GazeMeter::default);
    let on_event = Box::new(move |event: &GestureEvent| {
        print_event(event, &layout, meter.as_ref());
        true
    });

    let mut use_case = DriveCursorUseCase::new(
        source,
        relocator,
        Box::new(ThreadedGazeSession::new()),
        enabled,
    )
    .with_logger(Box::new(StdoutSessionLogger::new(cli.log_every)))
    .with_event_callback(on_event);

    let report = use_case.execute()?;
    print_report(&report, &warp);
    Ok(())
}

fn print_event(event: &GestureEvent, layout: &DisplayLayout, meter: Option<&GazeMeter>) {
    let t = event.at.as_secs_f64();
    if let Some(meter) = meter {
        println!("t={t:.3}s {}", meter.render(event.sample.map(|s| s.value())));
    }
    if let Some(line) = relocation_line(event, layout) {
        println!("{line}");
    }
}

fn relocation_line(event: &GestureEvent, layout: &DisplayLayout) -> Option<String> {
    let side = event.outcome?.command().side()?;
    let display = layout.display_for(side);
    let (x, y) = display.center();
    Some(format!(
        "t={:.3}s -> {side} display #{} at ({x}, {y})",
        event.at.as_secs_f64(),
        display.id
    ))
}

fn print_report(report: &SessionReport, warp: &RecordingCursorWarp) {
    println!(
        "{} frames, {} samples, {} without face",
        report.frames, report.samples, report.missing_faces
    );
    println!(
        "{} relocations ({} left, {} right, {} cursor warps), {} absorbed by cooldown, {} suppressed",
        report.commands(),
        report.moved_left,
        report.moved_right,
        warp.positions().len(),
        report.absorbed,
        report.suppressed
    );
    println!("{}", final_cursor_line(warp.current()));
}

fn final_cursor_line(position: Option<(i32, i32)>) -> String {
    match position {
        Some((x, y)) => format!("cursor ends at ({x}, {y})"),
        None => "cursor never moved".to_string(),
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.trace.exists() {
        return Err(format!("Trace file not found: {}", cli.trace.display()).into());
    }
    if let Some(ref displays) = cli.displays {
        if !displays.exists() {
            return Err(format!("Display layout not found: {}", displays.display()).into());
        }
    }
    if cli.log_every == 0 {
        return Err("--log-every must be at least 1".into());
    }
    Ok(())
}

fn parse_directions(value: &str) -> Result<EnabledDirections, Box<dyn std::error::Error>> {
    match value {
        "both" => Ok(EnabledDirections::BOTH),
        "left" => Ok(EnabledDirections::only(DisplaySide::Left)),
        "right" => Ok(EnabledDirections::only(DisplaySide::Right)),
        other => Err(format!(
            "Directions must be one of: both, left, right, got '{other}'"
        )
        .into()),
    }
}

fn load_layout(path: Option<&Path>) -> Result<DisplayLayout, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(DisplayLayout::from_json_file(path)?),
        None => Ok(DisplayLayout::side_by_side(
            2,
            DEFAULT_DISPLAY_WIDTH,
            DEFAULT_DISPLAY_HEIGHT,
        )?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gazeshift_core::cursor::domain::cursor_relocator::CursorWarp;
    use gazeshift_core::gesture::domain::gesture_command::GestureOutcome;
    use std::io::Write;
    use std::time::Duration;

    fn cli(trace: PathBuf) -> Cli {
        Cli {
            trace,
            displays: None,
            directions: "both".to_string(),
            meter: false,
            log_every: 300,
        }
    }

    #[test]
    fn test_parse_directions() {
        assert_eq!(parse_directions("both").unwrap(), EnabledDirections::BOTH);
        assert_eq!(
            parse_directions("left").unwrap(),
            EnabledDirections::only(DisplaySide::Left)
        );
        assert_eq!(
            parse_directions("right").unwrap(),
            EnabledDirections::only(DisplaySide::Right)
        );
        assert!(parse_directions("up").is_err());
    }

    #[test]
    fn test_default_layout_is_two_displays() {
        let layout = load_layout(None).unwrap();
        assert_eq!(layout.displays().len(), 2);
        assert_eq!(layout.target_for(DisplaySide::Right), (2880, 540));
    }

    #[test]
    fn test_relocation_line_only_for_fired_outcomes() {
        let layout = load_layout(None).unwrap();
        let event = |outcome| GestureEvent {
            at: Duration::from_millis(2500),
            sample: None,
            outcome,
        };

        assert_eq!(
            relocation_line(&event(Some(GestureOutcome::Fired(DisplaySide::Right))), &layout),
            Some("t=2.500s -> right display #2 at (2880, 540)".to_string())
        );
        assert_eq!(
            relocation_line(&event(Some(GestureOutcome::Absorbed(DisplaySide::Left))), &layout),
            None
        );
        assert_eq!(relocation_line(&event(None), &layout), None);
    }

    #[test]
    fn test_final_cursor_line_reports_last_warp() {
        let mut warp = RecordingCursorWarp::new();
        assert_eq!(final_cursor_line(warp.current()), "cursor never moved");

        warp.warp_to(960, 540).unwrap();
        warp.warp_to(2880, 540).unwrap();
        assert_eq!(final_cursor_line(warp.current()), "cursor ends at (2880, 540)");
    }

    #[test]
    fn test_validate_missing_trace() {
        let dir = tempfile::tempdir().unwrap();
        let err = validate(&cli(dir.path().join("none.jsonl"))).unwrap_err();
        assert!(err.to_string().contains("Trace file not found"));
    }

    #[test]
    fn test_validate_zero_log_every() {
        let mut trace = tempfile::NamedTempFile::new().unwrap();
        writeln!(trace, "{{\"t\": 0.0, \"x\": 0.5}}").unwrap();
        let mut args = cli(trace.path().to_path_buf());
        args.log_every = 0;
        assert!(validate(&args).is_err());
    }

    #[test]
    fn test_validate_accepts_existing_trace() {
        let trace = tempfile::NamedTempFile::new().unwrap();
        assert!(validate(&cli(trace.path().to_path_buf())).is_ok());
    }
}
