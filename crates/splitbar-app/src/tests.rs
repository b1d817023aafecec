#[cfg(test)]
mod tests {
    use crate::menu::{MenuController, MenuState};
    use crate::replay::{run_scenario, ReplayEvent, Scenario};
    use crate::settings::{load_settings_from, save_settings_to, SplitbarSettings};
    use crate::split_tile::SplitTile;
    use splitbar_core::{
        Clicker, DataSource, Dimension, DimensionKind, DragPosition, Essence, Rect,
        SplitCombine, SplitbarError, Splits, VisStrategy,
    };
    use splitbar_input::{
        write_dimension_payload, DataTransfer, EffectAllowed, SessionMode, TEXT_PLAIN_TYPE,
        URL_LIST_TYPE,
    };
    use splitbar_layout::StripGeometry;

    const BASE_URL: &str = "http://localhost:9090/";

    #[derive(Default)]
    struct RecordingClicker {
        removed: Vec<(SplitCombine, VisStrategy)>,
        changed: Vec<(Splits, VisStrategy)>,
    }

    impl Clicker for RecordingClicker {
        fn remove_split(&mut self, split: &SplitCombine, strategy: VisStrategy) {
            self.removed.push((split.clone(), strategy));
        }

        fn change_split(&mut self, split: SplitCombine, strategy: VisStrategy) {
            self.changed.push((Splits::from_split_combine(split), strategy));
        }

        fn change_splits(&mut self, splits: Splits, strategy: VisStrategy) {
            self.changed.push((splits, strategy));
        }
    }

    fn dim(name: &str, kind: DimensionKind) -> Dimension {
        let mut title = name.to_string();
        title[..1].make_ascii_uppercase();
        Dimension::new(name, title, format!("${}", name), kind)
    }

    fn data_source() -> DataSource {
        DataSource::new(
            "sales",
            vec![
                dim("country", DimensionKind::String),
                dim("channel", DimensionKind::String),
                dim("time", DimensionKind::Time),
                dim("revenue", DimensionKind::Number),
            ],
        )
    }

    fn split(name: &str) -> SplitCombine {
        SplitCombine::from_expression(format!("${}", name))
    }

    fn abc() -> Splits {
        Splits::new(vec![split("country"), split("channel"), split("time")])
    }

    /// Strip at client x=20 with 100px tiles and 10px gaps.
    fn tile() -> SplitTile {
        let essence = Essence::new(data_source(), abc(), BASE_URL);
        let mut tile = SplitTile::new(
            essence,
            StripGeometry::new(100.0, 10.0),
            Rect::new(0.0, 0.0, 800.0, 600.0),
        );
        tile.set_strip_rect(Rect::new(20.0, 0.0, 400.0, 40.0));
        tile
    }

    fn revenue_session() -> DataTransfer {
        let mut session = DataTransfer::new();
        write_dimension_payload(&mut session, &dim("revenue", DimensionKind::Number), BASE_URL)
            .unwrap();
        session.set_mode(SessionMode::ReadOnly);
        session
    }

    // ── Drop ────────────────────────────────────

    #[test]
    fn drop_on_tile_body_replaces() {
        let mut tile = tile();
        let mut clicker = RecordingClicker::default();
        // Middle of tile 1: 20 + 110 + 50.
        let response = tile.drop(180.0, &revenue_session(), &mut clicker);
        assert!(response.prevent_default);
        assert_eq!(
            clicker.changed,
            vec![(
                Splits::new(vec![split("country"), split("revenue"), split("time")]),
                VisStrategy::FairGame
            )]
        );
    }

    #[test]
    fn drop_on_tile_edge_inserts() {
        let mut tile = tile();
        let mut clicker = RecordingClicker::default();
        // Left edge of tile 1.
        tile.drop(132.0, &revenue_session(), &mut clicker);
        assert_eq!(
            clicker.changed[0].0,
            Splits::new(vec![
                split("country"),
                split("revenue"),
                split("channel"),
                split("time")
            ])
        );
    }

    #[test]
    fn drop_of_unknown_dimension_commits_nothing() {
        let mut tile = tile();
        let mut clicker = RecordingClicker::default();
        let mut session = DataTransfer::new();
        session.set_data("dimension/missing", "{}");
        session.set_mode(SessionMode::ReadOnly);

        let response = tile.drop(180.0, &session, &mut clicker);
        assert!(response.accepted);
        assert!(response.prevent_default);
        assert!(response.action.is_none());
        assert!(clicker.changed.is_empty());
    }

    #[test]
    fn hover_then_drop_returns_to_idle() {
        let mut tile = tile();
        let mut clicker = RecordingClicker::default();
        let mut session = revenue_session();
        session.set_mode(SessionMode::Protected);

        tile.drag_enter(180.0, &session);
        tile.drag_over(180.0, &mut session);
        assert_eq!(tile.drag_state().position(), DragPosition::Replace(1));

        session.set_mode(SessionMode::ReadOnly);
        tile.drop(180.0, &session, &mut clicker);
        assert!(!tile.drag_state().is_hovering());
    }

    #[test]
    fn cancel_clears_hover() {
        let mut tile = tile();
        let mut session = revenue_session();
        session.set_mode(SessionMode::Protected);
        tile.drag_enter(25.0, &session);
        tile.drag_over(25.0, &mut session);
        assert!(tile.drag_state().is_hovering());
        tile.cancel_drag();
        assert!(!tile.drag_state().is_hovering());
    }

    // ── Drag source ─────────────────────────────

    #[test]
    fn drag_start_writes_payload() {
        let tile = tile();
        let mut session = DataTransfer::new();
        assert!(tile.drag_start(1, &mut session).unwrap());

        let types: Vec<&str> = session.types().collect();
        assert!(types.contains(&"split/1"));
        assert!(types.contains(&"dimension/channel"));
        assert_eq!(session.effect_allowed, EffectAllowed::All);
        assert_eq!(session.drag_image_label(), Some("Channel"));

        let url = session.get_data(URL_LIST_TYPE).unwrap();
        assert!(url.starts_with(BASE_URL));
        assert!(url.contains("channel"));
        assert!(!url.contains("country"));
        assert_eq!(session.get_data(TEXT_PLAIN_TYPE), Some(url));
    }

    #[test]
    fn drag_start_past_end_is_refused() {
        let tile = tile();
        let mut session = DataTransfer::new();
        assert!(!tile.drag_start(3, &mut session).unwrap());
        assert_eq!(session.types().count(), 0);
    }

    // ── Menu ────────────────────────────────────

    #[test]
    fn menu_toggles_on_same_anchor() {
        let mut menu = MenuController::new();
        let country = dim("country", DimensionKind::String);
        assert!(menu.open(country.clone(), split("country"), "country"));
        assert_eq!(menu.anchor(), Some("country"));
        assert!(!menu.open(country, split("country"), "country"));
        assert_eq!(menu.state(), &MenuState::Closed);
        assert!(!menu.close());
    }

    #[test]
    fn menu_moves_to_new_anchor() {
        let mut menu = MenuController::new();
        menu.open(dim("country", DimensionKind::String), split("country"), "country");
        assert!(menu.open(dim("time", DimensionKind::Time), split("time"), "time"));
        assert_eq!(menu.anchor(), Some("time"));
    }

    #[test]
    fn click_tile_toggles_menu() {
        let mut tile = tile();
        assert!(tile.click_tile(0).unwrap());
        assert_eq!(tile.menu().anchor(), Some("country"));
        assert!(!tile.click_tile(0).unwrap());
        assert!(!tile.menu().is_open());
        assert!(!tile.click_tile(7).unwrap());
    }

    #[test]
    fn remove_tile_uses_fair_game_and_closes_menu() {
        let mut tile = tile();
        let mut clicker = RecordingClicker::default();
        tile.click_tile(2).unwrap();

        assert!(tile.remove_tile(2, &mut clicker));
        assert_eq!(clicker.removed, vec![(split("time"), VisStrategy::FairGame)]);
        assert!(!tile.menu().is_open());
        assert!(!tile.remove_tile(9, &mut clicker));
    }

    #[test]
    fn menu_request_needs_rendered_tile() {
        let mut tile = tile();
        let channel = dim("channel", DimensionKind::String);
        assert!(!tile.split_menu_request(&channel));

        tile.render().unwrap();
        assert!(tile.split_menu_request(&channel));
        assert_eq!(tile.menu().anchor(), Some("channel"));

        // No split for revenue.
        assert!(!tile.split_menu_request(&dim("revenue", DimensionKind::Number)));
    }

    // ── Render ──────────────────────────────────

    #[test]
    fn render_lays_out_tiles() {
        let mut tile = tile();
        let view = tile.render().unwrap();
        assert_eq!(view.title, "Split");
        assert_eq!(view.class_name(), "split-tile no-drag");
        assert_eq!(view.tiles.len(), 3);
        assert_eq!(view.tiles[1].title, "Channel");
        assert_eq!(view.tiles[2].x, 220.0);
        assert_eq!(view.tiles[2].class_names(), vec!["split", "type-time"]);
        assert!(view.indicator.is_none());
        assert!(view.menu.is_none());
    }

    #[test]
    fn render_shows_hover_and_selection() {
        let mut tile = tile();
        let mut session = revenue_session();
        session.set_mode(SessionMode::Protected);
        tile.drag_enter(132.0, &session);
        tile.drag_over(132.0, &mut session);
        tile.click_tile(0).unwrap();

        let view = tile.render().unwrap();
        assert!(view.drag_over);
        assert_eq!(view.class_name(), "split-tile drag-over");
        let indicator = view.indicator.unwrap();
        assert_eq!(indicator.position, DragPosition::Insert(1));
        assert_eq!(indicator.x, 105.0);
        assert!(view.tiles[0].selected);
        assert!(view.tiles[0].class_names().contains(&"selected".to_string()));
        let menu = view.menu.unwrap();
        assert_eq!(menu.anchor, "country");
        assert_eq!(menu.container, Rect::new(0.0, 0.0, 800.0, 600.0));
    }

    #[test]
    fn render_fails_on_dangling_split() {
        let essence = Essence::new(
            data_source(),
            Splits::new(vec![split("country"), split("ghost")]),
            BASE_URL,
        );
        let mut tile = SplitTile::new(essence, StripGeometry::default(), Rect::default());
        match tile.render() {
            Err(SplitbarError::DimensionNotFound { expression }) => assert_eq!(expression, "$ghost"),
            other => panic!("unexpected render result: {:?}", other),
        }
    }

    // ── Settings ────────────────────────────────

    #[test]
    fn settings_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let mut settings = SplitbarSettings::default();
        settings.strip.item_width = 120.0;
        settings.base_url = "https://example.com/pivot/".to_string();

        save_settings_to(&settings, &path);
        assert_eq!(load_settings_from(&path), settings);
    }

    #[test]
    fn malformed_settings_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_settings_from(&path), SplitbarSettings::default());
        assert_eq!(
            load_settings_from(&dir.path().join("missing.json")),
            SplitbarSettings::default()
        );
    }

    #[test]
    fn partial_settings_keep_defaults() {
        let settings: SplitbarSettings =
            serde_json::from_str(r#"{ "strip": { "item_gap": 4.0 } }"#).unwrap();
        assert_eq!(settings.strip.item_gap, 4.0);
        assert_eq!(settings.strip.item_width, 102.0);
        assert_eq!(settings.base_url, "http://localhost:9090/");
    }

    #[test]
    fn bad_strip_settings_use_default_geometry() {
        let mut settings = SplitbarSettings::default();
        settings.strip.item_width = -5.0;
        assert_eq!(settings.strip.geometry(), StripGeometry::default());
    }

    // ── Replay ──────────────────────────────────

    fn scenario(events: &str) -> Scenario {
        let json = format!(
            r#"{{
                "data_source": {{
                    "name": "sales",
                    "dimensions": [
                        {{ "name": "country", "title": "Country", "expression": "$country", "kind": "string" }},
                        {{ "name": "channel", "title": "Channel", "expression": "$channel", "kind": "string" }},
                        {{ "name": "time", "title": "Time", "expression": "$time", "kind": "time" }}
                    ]
                }},
                "splits": ["country", "channel", "time"],
                "events": {}
            }}"#,
            events
        );
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn replay_moves_tile_to_front() {
        let scenario = scenario(
            r#"[
                { "type": "drag_tile", "index": 2 },
                { "type": "enter", "x": 3 },
                { "type": "over", "x": 3 },
                { "type": "drop", "x": 3 }
            ]"#,
        );
        assert_eq!(scenario.events[3], ReplayEvent::Drop { x: 3.0 });

        let report = run_scenario(&scenario, StripGeometry::new(100.0, 10.0), BASE_URL).unwrap();
        assert_eq!(
            report.splits,
            Splits::new(vec![split("time"), split("country"), split("channel")])
        );
        assert!(report.steps.iter().all(|s| s.accepted));
        assert!(!report.view.drag_over);
    }

    #[test]
    fn replay_remove_and_menu() {
        let scenario = scenario(
            r#"[
                { "type": "click", "index": 0 },
                { "type": "remove", "index": 1 },
                { "type": "render" },
                { "type": "menu_request", "dimension": "time" }
            ]"#,
        );
        let report = run_scenario(&scenario, StripGeometry::default(), BASE_URL).unwrap();
        assert_eq!(report.splits, Splits::new(vec![split("country"), split("time")]));
        assert!(report.steps[3].accepted);
        assert_eq!(report.view.menu.unwrap().anchor, "time");
    }
}
