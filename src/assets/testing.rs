//! In-memory asset source, loopback HTTP responder and WAV fixtures for tests.

use std::collections::{HashMap, HashSet};
use std::io::Cursor;
use std::sync::Mutex;

use hound::{SampleFormat, WavSpec, WavWriter};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use super::source::AssetSource;
use crate::audio::float_to_i16;
use crate::error::{Result, StampError};
use crate::types::TimestampParts;

/// Answers a single HTTP request on a loopback port with `status` and `body`.
///
/// Returns the base URL to fetch from and a handle resolving to the request
/// line the server received.
pub(crate) async fn serve_once(
    status: &'static str,
    body: Vec<u8>,
) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();

        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..n]);
        }

        let head = format!(
            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            status,
            body.len()
        );
        stream.write_all(head.as_bytes()).await.unwrap();
        stream.write_all(&body).await.unwrap();
        let _ = stream.shutdown().await;

        String::from_utf8_lossy(&request)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string()
    });

    (format!("http://{}/resources", addr), handle)
}

/// Encodes interleaved samples as a 16-bit WAV payload.
pub(crate) fn wav_bytes(sample_rate: u32, channels: u16, interleaved: &[f32]) -> Vec<u8> {
    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut buffer = Vec::new();
    {
        let mut writer = WavWriter::new(Cursor::new(&mut buffer), spec).unwrap();
        for sample in interleaved {
            writer.write_sample(float_to_i16(*sample)).unwrap();
        }
        writer.finalize().unwrap();
    }
    buffer
}

/// Asset source backed by a map, recording every fetch.
#[derive(Default)]
pub(crate) struct MemorySource {
    assets: HashMap<String, Vec<u8>>,
    stalled: HashSet<String>,
    fetched: Mutex<Vec<String>>,
}

impl MemorySource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// A source holding a distinct mono snippet for every asset of `parts`.
    ///
    /// The snippet for the n-th canonical field has `n + 1` frames at 8000 Hz,
    /// each with value `(n + 1) / 16`.
    pub(crate) fn for_parts(parts: &TimestampParts) -> Self {
        let mut source = Self::new();
        for (index, (_, asset)) in parts.assets().into_iter().enumerate() {
            let value = (index + 1) as f32 / 16.0;
            source.insert(&asset, wav_bytes(8000, 1, &vec![value; index + 1]));
        }
        source
    }

    pub(crate) fn insert(&mut self, asset: &str, bytes: Vec<u8>) {
        self.assets.insert(asset.to_string(), bytes);
    }

    /// Makes fetches of `asset` never complete.
    pub(crate) fn stall(&mut self, asset: &str) {
        self.stalled.insert(asset.to_string());
    }

    /// Asset identifiers fetched so far, in request order.
    pub(crate) fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }

    pub(crate) fn fetch_count(&self) -> usize {
        self.fetched.lock().unwrap().len()
    }
}

impl AssetSource for MemorySource {
    fn locate(&self, asset: &str) -> String {
        format!("memory://{}", asset)
    }

    fn format_hint(&self) -> Option<&str> {
        Some("wav")
    }

    async fn fetch(&self, asset: &str) -> Result<Vec<u8>> {
        self.fetched.lock().unwrap().push(asset.to_string());

        if self.stalled.contains(asset) {
            std::future::pending::<()>().await;
        }

        self.assets
            .get(asset)
            .cloned()
            .ok_or_else(|| StampError::fetch_failed(asset, "not found"))
    }
}
