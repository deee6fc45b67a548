//! MPRIS backend: reads the queue of a Linux media player over D-Bus.
//!
//! The queue comes from `org.mpris.MediaPlayer2.TrackList`, the playing item
//! from `org.mpris.MediaPlayer2.Player.Metadata`. Players without a track
//! list cannot be segmented and are reported as unavailable.

use std::collections::HashMap;

use async_io::block_on;
use zbus::proxy::CacheProperties;
use zbus::{Connection, proxy};
use zvariant::{OwnedObjectPath, OwnedValue, Value};

use super::{QueueSource, RawQueue, SourceError, clean_field};
use crate::tanda::TrackRecord;

const MPRIS_PREFIX: &str = "org.mpris.MediaPlayer2.";

#[proxy(
    interface = "org.mpris.MediaPlayer2",
    default_path = "/org/mpris/MediaPlayer2"
)]
trait MediaPlayer2 {
    #[zbus(property)]
    fn has_track_list(&self) -> zbus::Result<bool>;
}

#[proxy(
    interface = "org.mpris.MediaPlayer2.Player",
    default_path = "/org/mpris/MediaPlayer2"
)]
trait Player {
    #[zbus(property)]
    fn metadata(&self) -> zbus::Result<HashMap<String, OwnedValue>>;
}

#[proxy(
    interface = "org.mpris.MediaPlayer2.TrackList",
    default_path = "/org/mpris/MediaPlayer2"
)]
trait TrackList {
    fn get_tracks_metadata(
        &self,
        track_ids: &[OwnedObjectPath],
    ) -> zbus::Result<Vec<HashMap<String, OwnedValue>>>;

    #[zbus(property)]
    fn tracks(&self) -> zbus::Result<Vec<OwnedObjectPath>>;
}

pub struct MprisSource {
    /// Bus name from the settings, already expanded.
    configured: Option<String>,
    /// Bus name in use; cleared on failure so the next poll looks again.
    resolved: Option<String>,
    connection: Option<Connection>,
}

impl MprisSource {
    pub fn new(player: Option<String>) -> Self {
        Self {
            configured: player.as_deref().map(expand_bus_name),
            resolved: None,
            connection: None,
        }
    }

    fn connection(&mut self) -> Result<Connection, SourceError> {
        if let Some(conn) = &self.connection {
            return Ok(conn.clone());
        }
        let conn = block_on(Connection::session()).map_err(unavailable)?;
        self.connection = Some(conn.clone());
        Ok(conn)
    }

    fn player_name(&mut self, conn: &Connection) -> Result<String, SourceError> {
        if let Some(name) = &self.resolved {
            return Ok(name.clone());
        }
        let name = match &self.configured {
            Some(name) => name.clone(),
            None => block_on(find_player(conn))?,
        };
        tracing::info!(player = %name, "using MPRIS player");
        self.resolved = Some(name.clone());
        Ok(name)
    }

    /// Forget the player and the bus connection after a failure.
    fn reset_on_error<T>(&mut self, res: Result<T, SourceError>) -> Result<T, SourceError> {
        if res.is_err() {
            self.resolved = None;
            self.connection = None;
        }
        res
    }
}

impl QueueSource for MprisSource {
    fn name(&self) -> &str {
        self.resolved
            .as_deref()
            .or(self.configured.as_deref())
            .unwrap_or("mpris")
    }

    fn fetch_queue(&mut self) -> Result<RawQueue, SourceError> {
        let conn = self.connection()?;
        let name = self.player_name(&conn)?;
        let res = block_on(read_track_list(&conn, &name));
        self.reset_on_error(res)
    }

    fn fetch_current(&mut self) -> Result<TrackRecord, SourceError> {
        let conn = self.connection()?;
        let name = self.player_name(&conn)?;
        let res = block_on(read_now_playing(&conn, &name));
        self.reset_on_error(res)
    }
}

async fn read_track_list(conn: &Connection, name: &str) -> Result<RawQueue, SourceError> {
    let tracklist = TrackListProxy::builder(conn)
        .destination(name)
        .map_err(unavailable)?
        .cache_properties(CacheProperties::No)
        .build()
        .await
        .map_err(unavailable)?;

    let ids = tracklist.tracks().await.map_err(unavailable)?;
    if ids.is_empty() {
        return Ok(RawQueue::default());
    }
    let metas = tracklist
        .get_tracks_metadata(&ids)
        .await
        .map_err(unavailable)?;
    Ok(queue_from_metadata(&metas))
}

async fn read_now_playing(conn: &Connection, name: &str) -> Result<TrackRecord, SourceError> {
    let player = PlayerProxy::builder(conn)
        .destination(name)
        .map_err(unavailable)?
        .cache_properties(CacheProperties::No)
        .build()
        .await
        .map_err(unavailable)?;

    let meta = player.metadata().await.map_err(unavailable)?;
    if meta.is_empty() {
        return Err(SourceError::Unavailable("nothing is playing".into()));
    }
    Ok(record_from_metadata(&meta))
}

/// Pick the first MPRIS player on the bus that exposes a track list.
async fn find_player(conn: &Connection) -> Result<String, SourceError> {
    let dbus = zbus::fdo::DBusProxy::new(conn).await.map_err(unavailable)?;
    let mut names: Vec<String> = dbus
        .list_names()
        .await
        .map_err(unavailable)?
        .into_iter()
        .map(|n| n.to_string())
        .filter(|n| n.starts_with(MPRIS_PREFIX))
        .collect();
    names.sort();

    for name in names {
        let root = MediaPlayer2Proxy::builder(conn)
            .destination(name.as_str())
            .map_err(unavailable)?
            .cache_properties(CacheProperties::No)
            .build()
            .await
            .map_err(unavailable)?;
        match root.has_track_list().await {
            Ok(true) => return Ok(name),
            Ok(false) => tracing::debug!(player = %name, "skipping MPRIS player without track list"),
            Err(e) => tracing::debug!(player = %name, error = %e, "MPRIS player did not answer"),
        }
    }

    Err(SourceError::Unavailable(
        "no MPRIS player with a track list on the session bus".into(),
    ))
}

fn unavailable(e: impl std::fmt::Display) -> SourceError {
    SourceError::Unavailable(e.to_string())
}

/// `rhythmbox` -> `org.mpris.MediaPlayer2.rhythmbox`; full names pass through.
pub(super) fn expand_bus_name(player: &str) -> String {
    let player = player.trim();
    if player.contains('.') {
        player.to_string()
    } else {
        format!("{MPRIS_PREFIX}{player}")
    }
}

pub(super) fn queue_from_metadata(metas: &[HashMap<String, OwnedValue>]) -> RawQueue {
    let mut queue = RawQueue::default();
    for meta in metas {
        let record = record_from_metadata(meta);
        queue.titles.push(record.title);
        queue.artists.push(record.artist);
        queue.genres.push(record.genre);
    }
    queue
}

pub(super) fn record_from_metadata(meta: &HashMap<String, OwnedValue>) -> TrackRecord {
    let field = |key: &str| {
        meta.get(key)
            .map(|v| clean_field(&value_text(v)))
            .unwrap_or_default()
    };
    TrackRecord::new(
        field("xesam:title"),
        field("xesam:artist"),
        field("xesam:genre"),
    )
}

/// Flatten a metadata value to text. `xesam:artist` and `xesam:genre` are
/// string lists and get joined with `", "`.
fn value_text(value: &Value<'_>) -> String {
    match value {
        Value::Str(s) => s.as_str().to_string(),
        Value::Array(items) => items
            .iter()
            .map(value_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Value(inner) => value_text(inner),
        _ => String::new(),
    }
}
