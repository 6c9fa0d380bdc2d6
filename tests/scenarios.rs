//! End-to-end scenarios driving the engine through its public API.

use std::io::Write;
use std::time::Duration;

use recordview::app::{Action, FilterChange, PageChange};
use recordview::search::{
    handle_search_event, Autocomplete, Candidate, SearchAction, SearchEvent, SearchState,
    TimerQueue,
};
use recordview::{
    handle_event, Column, Config, Event, FieldConstraint, Mode, Record, RecordId, RecordStore,
    SortDirection, SortKind, ViewController,
};

fn ids(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .filter_map(|r| r.id("id"))
        .map(|id| id.as_str().to_string())
        .collect()
}

fn life_events() -> Vec<Record> {
    vec![
        Record::new().with("id", "1").with("event", "birth").with("date", "2020-01-01"),
        Record::new().with("id", "2").with("event", "death").with("date", "2021-06-15"),
        Record::new().with("id", "3").with("event", "birth").with("date", "2019-03-10"),
    ]
}

#[test]
fn filter_on_last_page_returns_to_first() {
    let records: Vec<Record> = (1..=25)
        .map(|i| {
            Record::new()
                .with("id", i.to_string())
                .with("bucket", if i <= 5 { "small" } else { "large" })
        })
        .collect();
    let mut controller = ViewController::builder(records).page_size(10).build().unwrap();

    handle_event(&mut controller, &Event::PageChanged(7));
    assert_eq!(controller.page().current_page(), 3);
    assert_eq!(controller.page().total_pages(), 3);

    handle_event(
        &mut controller,
        &Event::FilterChanged(FieldConstraint::new("bucket", "small")),
    );

    let view = controller.compute_viewmodel();
    assert_eq!(view.total_count, 5);
    assert_eq!(view.pagination.current_page, 1);
    assert_eq!(view.pagination.total_pages, 1);
}

#[test]
fn filter_then_chronological_sort() {
    let mut controller = ViewController::builder(life_events())
        .columns(vec![
            Column::new("id"),
            Column::new("event"),
            Column::new("date").chronological(),
        ])
        .build()
        .unwrap();

    handle_event(
        &mut controller,
        &Event::FilterChanged(FieldConstraint::new("event", "birth")),
    );
    assert_eq!(ids(controller.filtered_sorted_records()), vec!["1", "3"]);

    handle_event(&mut controller, &Event::SortByColumn("date".to_string()));
    assert_eq!(ids(controller.filtered_sorted_records()), vec!["3", "1"]);

    handle_event(&mut controller, &Event::SortByColumn("date".to_string()));
    assert_eq!(ids(controller.filtered_sorted_records()), vec!["1", "3"]);
}

#[test]
fn three_keystrokes_evaluate_once() {
    let candidates = vec![Candidate::new("1", "Location one", "Location one")];
    let mut search = Autocomplete::new(candidates, &Config::default());
    let mut timers = TimerQueue::new();

    let fire = |search: &mut Autocomplete, timers: &mut TimerQueue, by: u64| {
        for id in timers.advance(Duration::from_millis(by)) {
            handle_search_event(search, timers, &SearchEvent::TimerFired(id));
        }
    };

    for (i, text) in ["L", "Lo", "Loc"].iter().enumerate() {
        if i > 0 {
            fire(&mut search, &mut timers, 50);
        }
        handle_search_event(&mut search, &mut timers, &SearchEvent::Input((*text).to_string()));
    }

    fire(&mut search, &mut timers, 299);
    assert_eq!(search.evaluations(), 0);
    fire(&mut search, &mut timers, 1);
    assert_eq!(search.evaluations(), 1);
    assert_eq!(timers.now(), Duration::from_millis(400));
    fire(&mut search, &mut timers, 5_000);
    assert_eq!(search.evaluations(), 1);
}

#[test]
fn prefix_query_keeps_candidate_order() {
    let candidates: Vec<Candidate> = ["Location one", "Location two", "Location three"]
        .iter()
        .enumerate()
        .map(|(i, name)| Candidate::new(i.to_string(), *name, *name))
        .collect();
    let mut search = Autocomplete::new(candidates, &Config::default());
    let mut timers = TimerQueue::new();

    handle_search_event(&mut search, &mut timers, &SearchEvent::Input("Location t".into()));
    for id in timers.advance(Duration::from_millis(300)) {
        handle_search_event(&mut search, &mut timers, &SearchEvent::TimerFired(id));
    }

    let labels: Vec<&str> = search.matches().iter().map(|c| c.display_label.as_str()).collect();
    assert_eq!(labels, vec!["Location two", "Location three"]);
    assert_eq!(search.state(), SearchState::DropdownOpen);
}

#[test]
fn unmatched_input_commits_free_text_on_blur() {
    let mut search = Autocomplete::new(vec![], &Config::default());
    let mut timers = TimerQueue::new();

    handle_search_event(&mut search, &mut timers, &SearchEvent::Input("Somewhere".into()));
    let actions = handle_search_event(&mut search, &mut timers, &SearchEvent::Blur);

    assert_eq!(actions, vec![SearchAction::Selected(Candidate::free_text("Somewhere"))]);
    assert!(timers.advance(Duration::from_secs(1)).is_empty());
}

#[test]
fn controlled_filter_reports_intent_only() {
    let mut controller = ViewController::builder(life_events())
        .filter_mode(Mode::Controlled)
        .build()
        .unwrap();

    let (needs_render, actions) = handle_event(
        &mut controller,
        &Event::FilterChanged(FieldConstraint::new("event", "death")),
    );

    assert!(needs_render);
    assert_eq!(controller.filtered_sorted_records().len(), 3);
    assert_eq!(
        actions,
        vec![Action::FilterChange(FilterChange {
            all_values: controller.filter().clone(),
            changed_value: FieldConstraint::new("event", "death"),
            field_kind: SortKind::Default,
        })]
    );
    assert_eq!(controller.compute_viewmodel().echo.filter.get("event"), Some("death"));
}

#[test]
fn server_side_paging_round_trip() {
    let page_one: Vec<Record> = (1..=10).map(|i| Record::new().with("id", i.to_string())).collect();
    let mut controller = ViewController::builder(page_one)
        .page_mode(Mode::Controlled)
        .build()
        .unwrap();

    handle_event(
        &mut controller,
        &Event::ExternalPage {
            current_page: 1,
            total_count: 35,
        },
    );
    let (_, actions) = handle_event(&mut controller, &Event::NextPage);
    assert_eq!(
        actions,
        vec![Action::PageChange(PageChange {
            requested: 2,
            previous: 1,
            total_pages: 4,
        })]
    );

    let page_two: Vec<Record> = (11..=20).map(|i| Record::new().with("id", i.to_string())).collect();
    handle_event(&mut controller, &Event::RecordsReplaced(page_two));
    handle_event(
        &mut controller,
        &Event::ExternalPage {
            current_page: 2,
            total_count: 35,
        },
    );

    let view = controller.compute_viewmodel();
    assert_eq!(ids(&view.display_records).first().map(String::as_str), Some("11"));
    assert_eq!(view.pagination.label(view.total_count), "11-20 of 35");
    assert!(view.pagination.can_go_next);
}

#[test]
fn expanded_row_collapses_when_removed() {
    let mut controller = ViewController::builder(life_events())
        .expandable(true)
        .build()
        .unwrap();
    let id = RecordId::new("2");

    handle_event(&mut controller, &Event::RowClicked(id.clone()));
    assert!(controller.is_expanded(&id));

    let survivors: Vec<Record> = life_events()
        .into_iter()
        .filter(|r| r.id("id").as_ref() != Some(&id))
        .collect();
    handle_event(&mut controller, &Event::RecordsReplaced(survivors));
    assert!(!controller.is_expanded(&id));
}

#[test]
fn json_records_drive_a_sorted_view() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"id": "a", "name": "Ada", "born": "1815-12-10"}},
            {{"id": "b", "name": "Grace", "born": "1906-12-09"}},
            {{"id": "c", "name": "Edsger", "born": null}},
            {{"id": "d", "name": "Barbara", "born": "11/03/1939",
              "statuses": [{{"code": "active"}}]}}
        ]"#
    )
    .unwrap();

    let store = RecordStore::from_json_file(file.path()).unwrap();
    let mut controller = ViewController::builder(store.into_records()).build().unwrap();

    handle_event(
        &mut controller,
        &Event::SortChanged {
            field: "born".to_string(),
            direction: SortDirection::Desc,
            kind: Some(SortKind::Chronological),
        },
    );

    assert_eq!(ids(controller.filtered_sorted_records()), vec!["d", "b", "a", "c"]);
    assert_eq!(
        controller.filter_options("name"),
        vec!["Ada", "Barbara", "Edsger", "Grace"]
    );
}
