use mp4_track::{format_fourcc, TrackRecord};

/// Pretty JSON array, one object per track.
pub fn render_json(tracks: &[TrackRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(tracks)
}

/// One aligned line per track, with a header row.
pub fn render_table(tracks: &[TrackRecord]) -> String {
    let mut out = format!(
        "{:>6}  {:<9}  {:<4}  {:<7}  {:<6}  {}\n",
        "ID", "TYPE", "LANG", "DEFAULT", "FORCED", "ENTRY"
    );
    for track in tracks {
        out.push_str(&format!(
            "{:>6}  {:<9}  {:<4}  {:<7}  {:<6}  {}\n",
            track.track_id(),
            track.media_type().to_string(),
            track.language().unwrap_or("-"),
            track.is_default(),
            track.is_forced(),
            track.sample_entry_tag().as_ref().map_or_else(|| "-".to_string(), format_fourcc)
        ));
    }
    out
}
