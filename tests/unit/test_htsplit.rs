//! Unit tests for HT bin splitting

use mg5batch::htsplit::{split, split_all, DEFAULT_THRESHOLDS};
use mg5batch::models::run_card::{IHTMAX, IHTMIN, NEVENTS, UNBOUNDED};
use mg5batch::{CardValue, ProcessDefinition, ProcessTable};

#[cfg(test)]
mod htsplit_tests {
    use super::*;

    fn wbb() -> ProcessDefinition {
        ProcessTable::standard().get("Wbb").unwrap()
    }

    #[test]
    fn test_default_bin_names() {
        let names: Vec<String> = split(&wbb(), &DEFAULT_THRESHOLDS)
            .iter()
            .map(|p| p.name().to_string())
            .collect();

        assert_eq!(
            names,
            vec![
                "Wbb_ihtmin0000_ihtmax0400",
                "Wbb_ihtmin0400_ihtmax0800",
                "Wbb_ihtmin0800_ihtmax1600",
                "Wbb_ihtmin1600_ihtmax3200",
                "Wbb_ihtmin3200",
            ]
        );
    }

    #[test]
    fn test_bins_share_parent_command() {
        let parent = wbb();
        for bin in split(&parent, &DEFAULT_THRESHOLDS) {
            assert_eq!(bin.command(), parent.command());
        }
    }

    #[test]
    fn test_bins_inherit_parent_options() {
        let mut parent = wbb();
        parent.set_nevents(1234);
        parent.run_card_mut().set("ebeam1", 6500.0);

        for bin in split(&parent, &DEFAULT_THRESHOLDS) {
            assert_eq!(bin.run_card().get_int(NEVENTS), Some(1234));
            assert_eq!(bin.run_card().get("ebeam1"), Some(&CardValue::Float(6500.0)));
        }
    }

    #[test]
    fn test_parent_is_untouched() {
        let parent = wbb();
        let _bins = split(&parent, &DEFAULT_THRESHOLDS);
        assert!(parent.run_card().get(IHTMIN).is_none());
        assert!(parent.run_card().get(IHTMAX).is_none());
    }

    #[test]
    fn test_sibling_independence() {
        let mut bins = split(&wbb(), &DEFAULT_THRESHOLDS);
        bins[0].run_card_mut().set(IHTMIN, 50u32);
        bins[0].run_card_mut().set(IHTMAX, 60u32);

        assert_eq!(bins[1].run_card().get_int(IHTMIN), Some(400));
        assert_eq!(bins[1].run_card().get_int(IHTMAX), Some(800));
        assert_eq!(bins[4].run_card().get_int(IHTMAX), Some(UNBOUNDED));
    }

    #[test]
    fn test_split_all_with_all_channels() {
        let table = ProcessTable::standard();
        let procs = table.select(&["all"]).unwrap();
        let bins = split_all(&procs, &DEFAULT_THRESHOLDS);

        assert_eq!(bins.len(), table.len() * DEFAULT_THRESHOLDS.len());
        assert_eq!(bins[0].name(), "WH_ihtmin0000_ihtmax0400");
        assert_eq!(bins[bins.len() - 1].name(), "ttbar_ihtmin3200");
    }

    #[test]
    fn test_single_threshold_is_open_ended() {
        let bins = split(&wbb(), &[200]);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].name(), "Wbb_ihtmin0200");
        assert_eq!(bins[0].run_card().get_int(IHTMAX), Some(UNBOUNDED));
    }
}
