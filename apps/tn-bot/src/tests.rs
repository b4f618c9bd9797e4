//! Tests for the tn-bot line protocol, rendering and config loading.

#[cfg(test)]
mod feed_tests {
    use std::io::Cursor;

    use tn_core::{NodeId, Point, Tag, UnitId};
    use tn_network::Link;

    use crate::feed::{FeedError, FeedReader};

    const TWO_TURNS: &str = "\
1000
0
0
2
0 0 0 0 2 1 1
1 1 10 0
900
1
0 1 1
1
1 2 0 1
0
";

    #[test]
    fn reads_consecutive_turns() {
        let mut feed = FeedReader::new(Cursor::new(TWO_TURNS));

        let first = feed.next_turn().unwrap().unwrap();
        assert_eq!(first.budget, 1_000);
        assert!(first.links.is_empty() && first.units.is_empty());
        assert_eq!(first.new_nodes.len(), 2);
        assert_eq!(first.new_nodes[0].demand(), &[Tag(1), Tag(1)]);
        assert_eq!(first.new_nodes[1].sink_tag(), Some(Tag(1)));
        assert_eq!(first.new_nodes[1].pos, Point::new(10, 0));

        let second = feed.next_turn().unwrap().unwrap();
        assert_eq!(second.budget, 900);
        assert_eq!(second.links, vec![Link { a: NodeId(0), b: NodeId(1), capacity: 1 }]);
        assert_eq!(second.units, vec![(UnitId(1), vec![NodeId(0), NodeId(1)])]);

        assert!(feed.next_turn().unwrap().is_none());
    }

    #[test]
    fn malformed_records_skipped() {
        let text = "500\n2\n0 1\n3 4 1\n1\n7 2 x 1\n2\n0 5 1 1 3 2\n2 6 abc 4\n";
        let snap = FeedReader::new(Cursor::new(text)).next_turn().unwrap().unwrap();
        // `0 1` is short, `7 2 x 1` and `2 6 abc 4` are non-numeric, and the
        // source claims 3 tags but lists 1.
        assert_eq!(snap.links, vec![Link { a: NodeId(3), b: NodeId(4), capacity: 1 }]);
        assert!(snap.units.is_empty());
        assert!(snap.new_nodes.is_empty());
    }

    #[test]
    fn extra_spaces_tolerated() {
        let text = "  250\n1\n2   3  0\n0\n1\n4  9 -5 7\n";
        let snap = FeedReader::new(Cursor::new(text)).next_turn().unwrap().unwrap();
        assert_eq!(snap.budget, 250);
        assert!(snap.links[0].is_instant());
        assert_eq!(snap.new_nodes[0].pos, Point::new(-5, 7));
        assert_eq!(snap.new_nodes[0].sink_tag(), Some(Tag(4)));
    }

    #[test]
    fn truncated_turn_is_an_error() {
        let err = FeedReader::new(Cursor::new("100\n2\n0 1 1\n")).next_turn().unwrap_err();
        assert!(matches!(err, FeedError::Truncated("link")));
    }

    #[test]
    fn bad_count_is_an_error() {
        let err = FeedReader::new(Cursor::new("100\nmany\n")).next_turn().unwrap_err();
        assert!(matches!(err, FeedError::BadCount { what: "link count", .. }));
    }
}

#[cfg(test)]
mod render_tests {
    use tn_core::{NodeId, UnitId};
    use tn_planner::Action;

    use crate::render::render;

    #[test]
    fn empty_turn_waits() {
        assert_eq!(render(&[]), "WAIT");
    }

    #[test]
    fn actions_joined_by_semicolons() {
        let actions = [
            Action::Link { a: NodeId(0), b: NodeId(1) },
            Action::Unit { id: UnitId(1), stops: vec![NodeId(0), NodeId(1)] },
        ];
        assert_eq!(render(&actions), "LINK 0 1;UNIT 1 0 1");
    }
}

#[cfg(test)]
mod config_tests {
    use std::fs;

    use tempfile::TempDir;

    use crate::config::{config_path, load_config};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let dir = tmp();
        let path = dir.path().join("engine.json");
        fs::write(&path, r#"{ "max_degree": 3, "caps": { "links": 2 } }"#).unwrap();
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.max_degree, 3);
        assert_eq!(cfg.caps.links, 2);
        assert_eq!(cfg.caps.total, 15);
        assert_eq!(cfg.fallback_min_budget, 50);
    }

    #[test]
    fn invalid_config_rejected() {
        let dir = tmp();
        let path = dir.path().join("engine.json");
        fs::write(&path, r#"{ "max_degree": 0 }"#).unwrap();
        assert!(load_config(&path).is_err());
        assert!(load_config(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn config_flag_forms() {
        assert_eq!(config_path(args(&["--config", "a.json"])).unwrap().as_deref(), Some("a.json"));
        assert_eq!(config_path(args(&["--config=b.json"])).unwrap().as_deref(), Some("b.json"));
        assert_eq!(config_path(args(&[])).unwrap(), None);
        assert!(config_path(args(&["--config"])).is_err());
    }
}

#[cfg(test)]
mod end_to_end {
    use std::io::Cursor;

    use tn_core::EngineConfig;
    use tn_engine::{Engine, NoopObserver};
    use tracing_subscriber::filter::LevelFilter;

    use crate::feed::FeedReader;
    use crate::logger::log_filter;
    use crate::render::render;

    #[test]
    fn first_turn_line() {
        let mut feed = FeedReader::new(Cursor::new("1000\n0\n0\n2\n0 0 0 0 1 1\n1 1 10 0\n"));
        let mut engine = Engine::new(EngineConfig::default()).unwrap();
        let snap = feed.next_turn().unwrap().unwrap();
        let report = engine.play_turn(&snap, &mut NoopObserver).unwrap();
        assert_eq!(render(report.actions()), "LINK 0 1;UNIT 1 0 1 0 1 0 1 0 1");
    }

    #[test]
    fn log_filter_parsing() {
        let hint = |value| log_filter(value).max_level_hint();
        assert_eq!(hint(Some("debug")), Some(LevelFilter::DEBUG));
        assert_eq!(hint(Some(" off ")), Some(LevelFilter::OFF));
        assert_eq!(hint(Some("tn_planner=trace,warn")), Some(LevelFilter::TRACE));
        assert_eq!(hint(Some("  ")), Some(LevelFilter::WARN));
        assert_eq!(hint(None), Some(LevelFilter::WARN));
    }
}
