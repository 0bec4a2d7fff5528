//! Playback through the default output device via rodio.

use std::{fs::File, io::BufReader};

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};
use tracing::info;

use super::backend::{PlaybackBackend, PlaybackError, PlaybackHandle};
use crate::sounds::uri::uri_to_path;

/// Plays local files on the default output stream.
pub struct RodioBackend {
    stream: OutputStream,
    volume: f32,
}

impl RodioBackend {
    /// Open the default output device.
    pub fn open_default(volume: f32) -> Result<Self, PlaybackError> {
        let stream = OutputStreamBuilder::open_default_stream()
            .map_err(|err| PlaybackError::NoOutput(err.to_string()))?;
        info!("Opened default audio output");
        Ok(Self {
            stream,
            volume: volume.clamp(0.0, 1.0),
        })
    }
}

impl PlaybackBackend for RodioBackend {
    fn start(&mut self, uri: &str) -> Result<Box<dyn PlaybackHandle>, PlaybackError> {
        let path = uri_to_path(uri).ok_or_else(|| PlaybackError::UnsupportedUri(uri.to_string()))?;
        let file = File::open(&path).map_err(|err| PlaybackError::Open {
            uri: uri.to_string(),
            message: err.to_string(),
        })?;
        let byte_len = file.metadata().map(|meta| meta.len()).ok();
        let mut builder = Decoder::builder()
            .with_data(BufReader::new(file))
            .with_seekable(true);
        if let Some(len) = byte_len {
            builder = builder.with_byte_len(len);
        }
        if let Some(ext) = path.extension().and_then(|ext| ext.to_str()) {
            builder = builder.with_hint(ext);
        }
        let decoder = builder.build().map_err(|err| PlaybackError::Decode {
            uri: uri.to_string(),
            message: err.to_string(),
        })?;

        let sink = Sink::connect_new(self.stream.mixer());
        sink.set_volume(self.volume);
        sink.append(decoder);
        sink.play();
        Ok(Box::new(RodioHandle { sink }))
    }
}

struct RodioHandle {
    sink: Sink,
}

impl PlaybackHandle for RodioHandle {
    fn is_finished(&self) -> bool {
        self.sink.empty()
    }

    fn stop(&mut self) {
        self.sink.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn backend() -> Option<RodioBackend> {
        RodioBackend::open_default(0.0).ok()
    }

    #[test]
    fn rejects_non_file_locations() {
        let Some(mut backend) = backend() else {
            return;
        };
        let err = backend.start("content://media/1").err().unwrap();
        assert!(matches!(err, PlaybackError::UnsupportedUri(_)));
    }

    #[test]
    fn reports_missing_and_undecodable_files() {
        let Some(mut backend) = backend() else {
            return;
        };
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.wav");
        let err = backend.start(missing.to_str().unwrap()).err().unwrap();
        assert!(matches!(err, PlaybackError::Open { .. }));

        let garbage = dir.path().join("garbage.wav");
        std::fs::write(&garbage, b"definitely not audio").unwrap();
        let err = backend.start(garbage.to_str().unwrap()).err().unwrap();
        assert!(matches!(err, PlaybackError::Decode { .. }));
    }
}
