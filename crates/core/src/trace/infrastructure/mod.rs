pub mod jsonl_trace_source;
