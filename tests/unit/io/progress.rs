//! Tests for progress display bookkeeping

#[cfg(test)]
mod tests {
    use photomosaic::io::progress::{CollageStage, ProgressManager};
    use std::path::Path;
    use std::time::Duration;

    // Tests stage steps are consecutive and match their order
    // Verified by reordering ALL
    #[test]
    fn test_stage_steps() {
        for (position, stage) in CollageStage::ALL.iter().enumerate() {
            assert_eq!(stage.step(), position + 1);
            assert!(!stage.label().is_empty());
        }
    }

    // Tests a full batch lifecycle runs without a terminal
    // Verified by indexing file states without bounds checks
    #[test]
    fn test_batch_lifecycle() {
        let mut manager = ProgressManager::new();
        manager.initialize(8);

        for index in 0..8 {
            manager.start_file(index, Path::new("targets/photo.jpg"));
            for stage in CollageStage::ALL {
                manager.enter_stage(index, stage);
            }
            manager.complete_file(index, Duration::from_millis(5));
        }

        manager.finish();
    }

    // Tests stage reports for unknown targets are ignored
    // Verified by resizing state on enter_stage
    #[test]
    fn test_unknown_index_ignored() {
        let mut manager = ProgressManager::default();
        manager.initialize(1);
        manager.enter_stage(3, CollageStage::Matching);
        manager.complete_file(3, Duration::ZERO);
        manager.finish();
    }

    // Tests the scan bar starts at zero with the requested length
    // Verified by creating the bar without a length
    #[test]
    fn test_scan_bar() {
        let manager = ProgressManager::new();
        let bar = manager.scan_bar(12);
        bar.inc(2);

        assert_eq!(bar.length(), Some(12));
        assert_eq!(bar.position(), 2);
    }
}
