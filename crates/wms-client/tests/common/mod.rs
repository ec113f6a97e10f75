//! Scripted transport for client tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use wms_client::{Fetcher, WmsError, WmsResult};

/// Records requested URLs and replays scripted responses.
///
/// Once the script is exhausted every call gets `fallback`, or a transport
/// error if there is none.
#[derive(Default)]
pub struct StubFetcher {
    script: Mutex<VecDeque<WmsResult<Bytes>>>,
    fallback: Option<Bytes>,
    urls: Mutex<Vec<String>>,
}

impl StubFetcher {
    /// Always answer with `body`.
    pub fn always(body: &str) -> Self {
        Self {
            fallback: Some(Bytes::from(body.to_string())),
            ..Self::default()
        }
    }

    /// Answer with these results in order.
    pub fn scripted(responses: Vec<WmsResult<Bytes>>) -> Self {
        Self {
            script: Mutex::new(responses.into()),
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.urls.lock().unwrap().len()
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }

    pub fn last_url(&self) -> Option<String> {
        self.urls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Fetcher for StubFetcher {
    async fn get(&self, url: &str) -> WmsResult<Bytes> {
        self.urls.lock().unwrap().push(url.to_string());
        if let Some(next) = self.script.lock().unwrap().pop_front() {
            return next;
        }
        match &self.fallback {
            Some(body) => Ok(body.clone()),
            None => Err(WmsError::Transport("no scripted response".to_string())),
        }
    }
}

pub fn body(s: &str) -> WmsResult<Bytes> {
    Ok(Bytes::from(s.to_string()))
}

/// A capabilities document whose title encodes how many layers it lists.
pub fn generation_doc(generation: usize) -> String {
    let layers: String = (0..generation)
        .map(|i| format!("<Layer><Name>gen_{}_{}</Name></Layer>", generation, i))
        .collect();
    format!(
        r#"<WMS_Capabilities xmlns="http://www.opengis.net/wms"><Service><Title>{}</Title></Service><Capability><Layer>{}</Layer></Capability></WMS_Capabilities>"#,
        generation, layers
    )
}
