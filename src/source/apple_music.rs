//! macOS Music (or iTunes) backend, scripted through `osascript`.
//!
//! Field lists are returned in one script run. Every item is prefixed with
//! ASCII 30 (record separator) and the three lists are joined with ASCII 29
//! (group separator), so commas inside titles cannot shift the columns.

use std::io::ErrorKind;
use std::process::Command;

use super::{QueueSource, RawQueue, SourceError, clean_field};
use crate::tanda::TrackRecord;

const ITEM_SEP: char = '\u{1e}';
const LIST_SEP: char = '\u{1d}';

const NOT_RUNNING: &str = "NOT_RUNNING";
const STOPPED: &str = "STOPPED";

pub struct AppleMusicSource {
    app_name: String,
}

impl AppleMusicSource {
    pub fn new(app_name: &str) -> Self {
        Self {
            app_name: app_name.to_string(),
        }
    }

    fn queue_script(&self) -> String {
        let app = applescript_escape(&self.app_name);
        format!(
            r#"on joinItems(theItems)
    set out to ""
    repeat with anItem in theItems
        set out to out & (ASCII character 30) & (anItem as text)
    end repeat
    return out
end joinItems

if application "{app}" is not running then return "{NOT_RUNNING}"
tell application "{app}"
    set theNames to name of every track of current playlist
    set theArtists to artist of every track of current playlist
    set theGenres to genre of every track of current playlist
end tell
return my joinItems(theNames) & (ASCII character 29) & my joinItems(theArtists) & (ASCII character 29) & my joinItems(theGenres)"#
        )
    }

    fn current_script(&self) -> String {
        let app = applescript_escape(&self.app_name);
        format!(
            r#"if application "{app}" is not running then return "{NOT_RUNNING}"
tell application "{app}"
    if player state is stopped then return "{STOPPED}"
    set t to current track
    return (name of t) & tab & (artist of t) & tab & (genre of t)
end tell"#
        )
    }
}

impl QueueSource for AppleMusicSource {
    fn name(&self) -> &str {
        &self.app_name
    }

    fn fetch_queue(&mut self) -> Result<RawQueue, SourceError> {
        let out = run_osascript(&self.queue_script())?;
        parse_queue_output(&out)
    }

    fn fetch_current(&mut self) -> Result<TrackRecord, SourceError> {
        let out = run_osascript(&self.current_script())?;
        parse_current_output(&out)
    }
}

fn run_osascript(script: &str) -> Result<String, SourceError> {
    let output = Command::new("osascript")
        .arg("-e")
        .arg(script)
        .output()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                SourceError::Unavailable("osascript not found (the Music backend needs macOS)".into())
            }
            _ => SourceError::Unavailable(format!("failed to run osascript: {e}")),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SourceError::Unavailable(format!(
            "osascript exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn check_status(out: &str) -> Result<(), SourceError> {
    match out.trim() {
        NOT_RUNNING => Err(SourceError::Unavailable("player is not running".into())),
        STOPPED => Err(SourceError::Unavailable("playback is stopped".into())),
        _ => Ok(()),
    }
}

pub(super) fn parse_queue_output(out: &str) -> Result<RawQueue, SourceError> {
    check_status(out)?;

    let body = out.strip_suffix('\n').unwrap_or(out);
    let lists: Vec<&str> = body.split(LIST_SEP).collect();
    let [titles, artists, genres] = lists.as_slice() else {
        return Err(SourceError::Malformed(format!(
            "expected 3 field lists, got {}",
            lists.len()
        )));
    };

    Ok(RawQueue {
        titles: split_items(titles),
        artists: split_items(artists),
        genres: split_items(genres),
    })
}

fn split_items(list: &str) -> Vec<String> {
    // Every item carries a leading separator, so the first piece is always
    // empty (or the whole string when the list has no items).
    list.split(ITEM_SEP).skip(1).map(clean_field).collect()
}

pub(super) fn parse_current_output(out: &str) -> Result<TrackRecord, SourceError> {
    check_status(out)?;

    let body = out.strip_suffix('\n').unwrap_or(out);
    let mut parts = body.splitn(3, '\t');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(title), Some(artist), Some(genre)) => Ok(TrackRecord::new(
            clean_field(title),
            clean_field(artist),
            clean_field(genre),
        )),
        _ => Err(SourceError::Malformed(format!(
            "expected name, artist and genre separated by tabs, got {:?}",
            body
        ))),
    }
}

fn applescript_escape(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace(['\n', '\r'], " ")
}
