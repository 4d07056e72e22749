//! Unit tests for the channel table

use mg5batch::channels::{ALL_CHANNELS, SM_HEADER, STANDARD_CHANNELS};
use mg5batch::{Error, ProcessTable};

#[cfg(test)]
mod channel_tests {
    use super::*;

    #[test]
    fn test_ttbar_is_header_plus_channel_text() {
        let table = ProcessTable::standard();
        let ttbar = table.get("ttbar").unwrap();

        let (_, channel_text) = STANDARD_CHANNELS
            .iter()
            .find(|(name, _)| *name == "ttbar")
            .unwrap();

        assert_eq!(ttbar.name(), "ttbar");
        assert_eq!(ttbar.command(), format!("{}{}", SM_HEADER, channel_text));
        assert!(ttbar.run_card().is_empty());
    }

    #[test]
    fn test_every_channel_present() {
        let table = ProcessTable::standard();
        for name in ["ttbar", "Wbb", "Zbb", "WH", "ZH"] {
            assert!(table.get(name).is_ok(), "missing channel {}", name);
        }
        assert_eq!(table.len(), STANDARD_CHANNELS.len());
    }

    #[test]
    fn test_all_is_not_a_channel() {
        let table = ProcessTable::standard();
        let result = table.get(ALL_CHANNELS);
        assert!(matches!(result, Err(Error::UnknownChannel { .. })));
    }

    #[test]
    fn test_unregistered_name_fails() {
        let table = ProcessTable::standard();
        match table.get("Wjj") {
            Err(Error::UnknownChannel { channel }) => assert_eq!(channel, "Wjj"),
            other => panic!("Expected UnknownChannel, got {:?}", other),
        }
    }

    #[test]
    fn test_select_fails_on_first_unknown() {
        let table = ProcessTable::standard();
        let result = table.select(&["WH", "bogus", "ZH"]);
        assert!(matches!(
            result,
            Err(Error::UnknownChannel { channel }) if channel == "bogus"
        ));
    }

    #[test]
    fn test_get_returns_independent_copy() {
        let table = ProcessTable::standard();
        let mut zh = table.get("ZH").unwrap();
        zh.set_nevents(10);

        assert!(table.get("ZH").unwrap().run_card().is_empty());
    }

    #[test]
    fn test_custom_table() {
        let table = ProcessTable::with_channels("import model sm\n", [("dy", "generate p p > l+ l-\n")]);
        let dy = table.get("dy").unwrap();
        assert_eq!(dy.command(), "import model sm\ngenerate p p > l+ l-\n");
    }
}
