use nbn_analyzer::analytics::pivot::{Ohlc, pivot_set};
use nbn_analyzer::{OutputFormat, OutputSink, OutputWriter};

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use std::path::PathBuf;

    fn scratch_dir() -> PathBuf {
        let suffix: u64 = rand::thread_rng().r#gen();
        std::env::temp_dir().join(format!("nbn-output-{:x}", suffix))
    }

    #[test]
    fn test_json_writer_saves_under_operation_dir() {
        let root = scratch_dir();
        let writer = OutputWriter::new(OutputFormat::Json, &root, 2);
        let levels = pivot_set(&Ohlc::new(100.0, 110.0, 90.0, 105.0));

        let path = writer.emit("support_resistance", &levels).unwrap().unwrap();
        assert!(path.starts_with(root.join("support_resistance")));
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("json"));

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["classic"]["support1"], 93.33);

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_std_writer_returns_no_path() {
        let root = scratch_dir();
        let writer = OutputWriter::new(OutputFormat::Std, &root, 2);
        assert_eq!(writer.format(), OutputFormat::Std);
        assert!(writer.emit("ohlc", &Ohlc::new(1.0, 2.0, 0.5, 1.5)).unwrap().is_none());
        assert!(!root.exists());
    }
}
