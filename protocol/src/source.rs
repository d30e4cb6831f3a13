use std::collections::VecDeque;
use std::io::BufRead;

use crate::*;

/// Where requests come from. Sources are drained in order by a [`GameHost`].
pub trait ActionSource {
    /// Next pending request, `None` once nothing is queued.
    fn next_request(&mut self) -> Result<Option<Request>>;
}

/// Requests produced in-process, e.g. by a local mouse or keyboard handler.
#[derive(Clone, Debug, Default)]
pub struct LocalSource {
    queue: VecDeque<Request>,
}

impl LocalSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, request: impl Into<Request>) {
        self.queue.push_back(request.into());
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl ActionSource for LocalSource {
    fn next_request(&mut self) -> Result<Option<Request>> {
        Ok(self.queue.pop_front())
    }
}

/// Requests arriving from a remote peer as JSON lines.
#[derive(Debug)]
pub struct RemoteSource<R> {
    reader: R,
    line: Vec<u8>,
}

impl<R: BufRead> RemoteSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::new(),
        }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: BufRead> ActionSource for RemoteSource<R> {
    fn next_request(&mut self) -> Result<Option<Request>> {
        loop {
            self.line.clear();
            if self.reader.read_until(b'\n', &mut self.line)? == 0 {
                return Ok(None);
            }
            let line = std::str::from_utf8(&self.line)?;
            if !line.trim().is_empty() {
                return decode_line(line).map(Some);
            }
        }
    }
}
