//! Best-effort cry playback. Any failure is swallowed.

#[cfg(feature = "audio")]
mod backend {
    use std::io::Cursor;

    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
    use tracing::debug;

    pub struct CryPlayer {
        _stream: Option<OutputStream>,
        handle: Option<OutputStreamHandle>,
        sink: Option<Sink>,
    }

    impl CryPlayer {
        pub fn new() -> Self {
            let (stream, handle) = match OutputStream::try_default() {
                Ok((s, h)) => (Some(s), Some(h)),
                Err(e) => {
                    debug!(error = %e, "no audio output device");
                    (None, None)
                }
            };
            Self {
                _stream: stream,
                handle,
                sink: None,
            }
        }

        /// False when no output device opened.
        pub fn is_available(&self) -> bool {
            self.handle.is_some()
        }

        pub fn play(&mut self, bytes: Vec<u8>) {
            if let Some(sink) = self.sink.take() {
                sink.stop();
            }
            let Some(handle) = self.handle.as_ref() else {
                return;
            };
            let sink = match Sink::try_new(handle) {
                Ok(s) => s,
                Err(_) => return,
            };
            let decoder = match Decoder::new(Cursor::new(bytes)) {
                Ok(d) => d,
                Err(e) => {
                    debug!(error = %e, "cry not decodable");
                    return;
                }
            };
            sink.append(decoder);
            self.sink = Some(sink);
        }
    }
}

#[cfg(not(feature = "audio"))]
mod backend {
    use tracing::debug;

    pub struct CryPlayer;

    impl CryPlayer {
        pub fn new() -> Self {
            CryPlayer
        }

        pub fn is_available(&self) -> bool {
            false
        }

        pub fn play(&mut self, bytes: Vec<u8>) {
            debug!(len = bytes.len(), "built without the audio feature; cry not played");
        }
    }
}

pub use backend::CryPlayer;
