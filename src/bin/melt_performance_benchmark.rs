//! Benchmark for melting a large synthetic library
//!
//! Generates a library export with many tracks and a playlist section, then
//! times the single-pass conversion to CSV.

use plist_melt::{melt_plist, MeltConfig};
use std::fmt::Write as _;
use std::time::Instant;

const TRACKS: usize = 50_000;

fn synthetic_library(tracks: usize) -> String {
    let mut xml = String::with_capacity(tracks * 600);
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<plist version=\"1.0\">\n<dict>\n");
    xml.push_str("\t<key>Major Version</key><integer>1</integer>\n\t<key>Tracks</key>\n\t<dict>\n");

    for i in 0..tracks {
        let _ = write!(
            xml,
            "\t\t<key>{id}</key>\n\t\t<dict>\n\
             \t\t\t<key>Track ID</key><integer>{id}</integer>\n\
             \t\t\t<key>Name</key><string>Song {id}, take &quot;{take}&quot;</string>\n\
             \t\t\t<key>Artist</key><string>Artist {artist}</string>\n\
             \t\t\t<key>Album</key><string>Album {album}</string>\n\
             \t\t\t<key>Kind</key><string>MPEG audio file</string>\n\
             \t\t\t<key>Total Time</key><integer>{time}</integer>\n\
             \t\t\t<key>Date Added</key><date>2011-02-01T10:00:00Z</date>\n\
             \t\t\t<key>Location</key><string>file:///Music/{id}.mp3</string>\n\
             \t\t</dict>\n",
            id = i,
            take = i % 3,
            artist = i % 97,
            album = i % 211,
            time = 180_000 + i % 60_000,
        );
    }

    xml.push_str("\t</dict>\n\t<key>Playlists</key>\n\t<array>\n\t\t<dict>\n");
    xml.push_str("\t\t\t<key>Name</key><string>Library</string>\n\t\t\t<key>Playlist Items</key>\n\t\t\t<array>\n");
    for i in 0..tracks {
        let _ = write!(
            xml,
            "\t\t\t\t<dict><key>Track ID</key><integer>{}</integer></dict>\n",
            i
        );
    }
    xml.push_str("\t\t\t</array>\n\t\t</dict>\n\t</array>\n</dict>\n</plist>\n");
    xml
}

fn main() -> anyhow::Result<()> {
    println!("=== plist-melt Performance Benchmark ===\n");

    let xml = synthetic_library(TRACKS);
    println!(
        "Generated library: {} tracks, {:.1} MiB\n",
        TRACKS,
        xml.len() as f64 / (1024.0 * 1024.0)
    );

    let config = MeltConfig {
        progress_interval: 0,
        ..MeltConfig::default()
    };

    let mut output = Vec::with_capacity(TRACKS * 128);
    let start = Instant::now();
    let stats = melt_plist(xml.as_bytes(), &mut output, std::io::sink(), &config)?;
    let duration = start.elapsed();

    println!("Time: {:?}", duration);
    println!("Events: {}", stats.events);
    println!("Rows written: {}", stats.records);
    println!("CSV size: {:.1} MiB", output.len() as f64 / (1024.0 * 1024.0));
    println!(
        "Throughput: {:.1} MiB/s",
        xml.len() as f64 / (1024.0 * 1024.0) / duration.as_secs_f64()
    );
    println!(
        "Average per track: {:.2}us",
        duration.as_micros() as f64 / TRACKS as f64
    );

    anyhow::ensure!(stats.records == TRACKS as u64, "expected one row per track");

    Ok(())
}
