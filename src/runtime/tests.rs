use std::collections::VecDeque;
use std::time::Duration;

use super::poll::{PollContext, PollOutcome, poll_once};
use super::settings::{apply_cli, dj_name};
use super::stream::{self, StreamFormat};
use crate::cli::Cli;
use crate::config::{OutputMode, Settings, SourceKind};
use crate::render::DEFAULT_STYLESHEET;
use crate::source::{QueueSource, RawQueue, SourceError};
use crate::tanda::{CORTINA_GENRE, TrackRecord};

/// Replays scripted snapshots, one per poll.
struct FakeSource {
    snapshots: VecDeque<Result<(RawQueue, TrackRecord), SourceError>>,
    staged: Option<TrackRecord>,
}

impl FakeSource {
    fn new(snapshots: Vec<Result<(RawQueue, TrackRecord), SourceError>>) -> Self {
        Self {
            snapshots: snapshots.into(),
            staged: None,
        }
    }
}

impl QueueSource for FakeSource {
    fn name(&self) -> &str {
        "fake"
    }

    fn fetch_queue(&mut self) -> Result<RawQueue, SourceError> {
        match self.snapshots.pop_front() {
            Some(Ok((raw, current))) => {
                self.staged = Some(current);
                Ok(raw)
            }
            Some(Err(e)) => Err(e),
            None => Err(SourceError::Unavailable("script exhausted".into())),
        }
    }

    fn fetch_current(&mut self) -> Result<TrackRecord, SourceError> {
        self.staged
            .take()
            .ok_or_else(|| SourceError::Unavailable("no queue fetched".into()))
    }
}

fn raw(records: &[(&str, &str, &str)]) -> RawQueue {
    RawQueue {
        titles: records.iter().map(|r| r.0.to_string()).collect(),
        artists: records.iter().map(|r| r.1.to_string()).collect(),
        genres: records.iter().map(|r| r.2.to_string()).collect(),
    }
}

fn playlist() -> RawQueue {
    raw(&[
        ("A", "a", "Tango"),
        ("B", "b", "Tango"),
        ("C1", "", CORTINA_GENRE),
        ("D", "d", "Vals"),
        ("C2", "", CORTINA_GENRE),
    ])
}

#[test]
fn first_pass_is_a_change_and_repeat_is_not() {
    let mut source = FakeSource::new(vec![
        Ok((playlist(), TrackRecord::new("A", "a", "Tango"))),
        Ok((playlist(), TrackRecord::new("A", "a", "Tango"))),
    ]);
    let ctx = PollContext::new(Duration::ZERO);

    let (ctx, outcome) = poll_once(&mut source, ctx);
    let PollOutcome::Changed(state) = outcome else {
        panic!("expected a change, got {outcome:?}");
    };
    assert_eq!(state.current_tanda.len(), 3);
    assert_eq!(ctx.previous_tanda.as_deref(), Some(state.current_tanda.as_slice()));
    assert_eq!(ctx.previous_track, Some(TrackRecord::new("A", "a", "Tango")));

    let (_ctx, outcome) = poll_once(&mut source, ctx);
    assert!(matches!(outcome, PollOutcome::Unchanged(_)), "got {outcome:?}");
}

#[test]
fn next_song_of_same_tanda_moves_the_highlight() {
    let mut source = FakeSource::new(vec![
        Ok((playlist(), TrackRecord::new("A", "a", "Tango"))),
        Ok((playlist(), TrackRecord::new("B", "b", "Tango"))),
        Ok((playlist(), TrackRecord::new("C1", "", CORTINA_GENRE))),
    ]);

    let (ctx, _) = poll_once(&mut source, PollContext::new(Duration::ZERO));
    let (ctx, outcome) = poll_once(&mut source, ctx);
    let PollOutcome::Moved(state) = outcome else {
        panic!("expected the playing record to move, got {outcome:?}");
    };
    assert_eq!(state.current_track, TrackRecord::new("B", "b", "Tango"));
    assert_eq!(ctx.previous_tanda.as_deref(), Some(state.current_tanda.as_slice()));
    assert_eq!(ctx.previous_track, Some(TrackRecord::new("B", "b", "Tango")));

    // the closing cortina still belongs to the same tanda
    let (ctx, outcome) = poll_once(&mut source, ctx);
    assert!(matches!(outcome, PollOutcome::Moved(_)), "got {outcome:?}");
    assert_eq!(ctx.previous_track, Some(TrackRecord::new("C1", "", CORTINA_GENRE)));
}

#[test]
fn moving_to_next_tanda_is_a_change() {
    let mut source = FakeSource::new(vec![
        Ok((playlist(), TrackRecord::new("A", "a", "Tango"))),
        Ok((playlist(), TrackRecord::new("D", "d", "Vals"))),
    ]);

    let (ctx, _) = poll_once(&mut source, PollContext::new(Duration::ZERO));
    let (ctx, outcome) = poll_once(&mut source, ctx);

    let PollOutcome::Changed(state) = outcome else {
        panic!("expected a change, got {outcome:?}");
    };
    let titles: Vec<&str> = state.current_tanda.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["D", "C2"]);
    assert!(state.next_tanda.is_empty());
    assert_eq!(ctx.previous_tanda.unwrap().len(), 2);
}

#[test]
fn source_failure_skips_and_keeps_previous_tanda() {
    let mut source = FakeSource::new(vec![
        Ok((playlist(), TrackRecord::new("A", "a", "Tango"))),
        Err(SourceError::Unavailable("player is not running".into())),
        Ok((playlist(), TrackRecord::new("A", "a", "Tango"))),
    ]);

    let (ctx, _) = poll_once(&mut source, PollContext::new(Duration::ZERO));
    let before = ctx.previous_tanda.clone();

    let (ctx, outcome) = poll_once(&mut source, ctx);
    assert!(matches!(outcome, PollOutcome::Skipped(ref msg) if msg.contains("not running")));
    assert_eq!(ctx.previous_tanda, before);

    // back to the same tanda: still no redraw
    let (_, outcome) = poll_once(&mut source, ctx);
    assert!(matches!(outcome, PollOutcome::Unchanged(_)));
}

#[test]
fn inconsistent_lists_skip_the_cycle() {
    let mut broken = playlist();
    broken.artists.pop();
    let mut source = FakeSource::new(vec![Ok((broken, TrackRecord::new("A", "a", "Tango")))]);

    let (ctx, outcome) = poll_once(&mut source, PollContext::new(Duration::ZERO));
    assert!(matches!(outcome, PollOutcome::Skipped(ref msg) if msg.contains("4 artists")));
    assert!(ctx.previous_tanda.is_none());
}

#[test]
fn undefined_tanda_skips_the_cycle() {
    let open_ended = raw(&[("A", "a", "Tango"), ("B", "b", "Tango")]);
    let mut source = FakeSource::new(vec![
        Ok((open_ended, TrackRecord::new("A", "a", "Tango"))),
        Ok((playlist(), TrackRecord::new("X", "x", "Tango"))),
    ]);

    let (ctx, outcome) = poll_once(&mut source, PollContext::new(Duration::ZERO));
    assert!(matches!(outcome, PollOutcome::Skipped(_)));
    let (ctx, outcome) = poll_once(&mut source, ctx);
    assert!(matches!(outcome, PollOutcome::Skipped(_)));
    assert!(ctx.previous_tanda.is_none());
}

#[test]
fn elapsed_includes_time_offset() {
    let ctx = PollContext::new(Duration::from_secs(600));
    assert!(ctx.elapsed() >= Duration::from_secs(600));
    assert!(ctx.elapsed() < Duration::from_secs(660));
}

#[test]
fn cli_flags_override_settings() {
    let mut settings = Settings::default();
    let cli = Cli {
        interval: Some(3),
        time_offset: Some(120),
        dj: Some("Ana".to_string()),
        output: Some(OutputMode::Html),
        source: Some(SourceKind::Mpris),
        player: Some("rhythmbox".to_string()),
        print_config: false,
    };

    apply_cli(&mut settings, &cli);
    assert_eq!(settings.poll.interval_secs, 3);
    assert_eq!(settings.poll.time_offset_secs, 120);
    assert_eq!(settings.display.dj.as_deref(), Some("Ana"));
    assert_eq!(settings.display.output, OutputMode::Html);
    assert_eq!(settings.source.kind, SourceKind::Mpris);
    assert_eq!(settings.source.mpris_player.as_deref(), Some("rhythmbox"));
    assert_eq!(dj_name(&settings), "Ana");
}

#[test]
fn player_flag_names_the_app_for_apple_music() {
    let mut settings = Settings::default();
    let cli = Cli {
        source: Some(SourceKind::AppleMusic),
        player: Some("iTunes".to_string()),
        ..Cli::default()
    };

    apply_cli(&mut settings, &cli);
    assert_eq!(settings.source.app_name, "iTunes");
    assert_eq!(settings.source.mpris_player, None);
}

#[test]
fn missing_flags_keep_settings() {
    let mut settings = Settings::default();
    settings.poll.interval_secs = 7;
    apply_cli(&mut settings, &Cli::default());
    assert_eq!(settings.poll.interval_secs, 7);
    assert_eq!(settings.display.output, OutputMode::Tui);
}

/// Collects output and fails once `flushes` run out, so `stream::run`
/// returns after a known number of redraws.
#[derive(Default)]
struct Capture {
    bytes: Vec<u8>,
    flushes: usize,
}

impl std::io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if self.flushes == 0 {
            return Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"));
        }
        self.flushes -= 1;
        Ok(())
    }
}

#[test]
fn stream_prints_html_page_on_first_change() {
    let mut source = FakeSource::new(vec![Ok((playlist(), TrackRecord::new("D", "d", "Vals")))]);
    let mut out = Capture::default();
    let format = StreamFormat::Html {
        stylesheet: "body {}".to_string(),
    };

    let res = stream::run(&mut out, &mut source, &Settings::default().poll, "Ana", &format);
    assert!(res.is_err());

    let page = String::from_utf8(out.bytes).unwrap();
    assert!(page.contains("<style type=\"text/css\">body {}</style>"));
    assert!(page.contains("<h3>CURRENT TANDA: Vals</h3>"));
    assert!(page.contains("DJ Ana"));
}

#[test]
fn stream_clears_screen_in_text_mode() {
    let mut source = FakeSource::new(vec![Ok((playlist(), TrackRecord::new("A", "a", "Tango")))]);
    let mut out = Capture::default();

    let res = stream::run(
        &mut out,
        &mut source,
        &Settings::default().poll,
        "Ana",
        &StreamFormat::Text,
    );
    assert!(res.is_err());

    let text = String::from_utf8(out.bytes).unwrap();
    assert!(text.starts_with("\u{1b}[2J"));
    assert!(text.contains("CURRENT TANDA: Tango"));
    assert!(text.contains("NEXT TANDA: Vals"));
}

#[test]
fn stream_redraws_when_the_playing_record_moves() {
    let mut source = FakeSource::new(vec![
        Ok((playlist(), TrackRecord::new("A", "a", "Tango"))),
        Ok((playlist(), TrackRecord::new("A", "a", "Tango"))),
        Ok((playlist(), TrackRecord::new("B", "b", "Tango"))),
    ]);
    let mut out = Capture {
        flushes: 1,
        ..Capture::default()
    };

    let res = stream::run(
        &mut out,
        &mut source,
        &Settings::default().poll,
        "Ana",
        &StreamFormat::Text,
    );
    assert!(res.is_err());

    let text = String::from_utf8(out.bytes).unwrap();
    let pages: Vec<&str> = text.split("\u{1b}[2J").filter(|p| !p.is_empty()).collect();
    assert_eq!(pages.len(), 2, "one page for A, none for the repeat, one for B");
    assert!(pages[0].contains("\u{266B} a, A"));
    assert!(pages[0].contains("  b, B"));
    assert!(pages[1].contains("  a, A"));
    assert!(pages[1].contains("\u{266B} b, B"));
}

#[test]
fn stylesheet_is_read_from_configured_file() {
    let dir = tempfile::tempdir().unwrap();
    let css = dir.path().join("styles.css");
    std::fs::write(&css, "body { color: black; }").unwrap();

    let mut display = Settings::default().display;
    assert_eq!(stream::load_stylesheet(&display), DEFAULT_STYLESHEET);

    display.stylesheet = Some(css);
    assert_eq!(stream::load_stylesheet(&display), "body { color: black; }");

    display.stylesheet = Some(dir.path().join("missing.css"));
    assert_eq!(stream::load_stylesheet(&display), DEFAULT_STYLESHEET);
}
