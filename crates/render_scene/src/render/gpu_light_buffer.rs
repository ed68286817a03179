//! Fixed-capacity GPU light buffer
//!
//! The scene repopulates this buffer every frame, marks the rows it wrote as
//! dirty and commits them to a [`LightBufferSink`]. The sink is the only
//! reader: it sees bytes only through `commit`, never a half-written array.

use std::ops::Range;

use thiserror::Error;

use super::lighting::LightParameters;
use crate::config::SceneConfig;

/// Hard ceiling on lights the GPU buffer can hold
pub const MAX_LIGHT_COUNT: usize = 255;

/// Light buffer errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LightBufferError {
    /// Dirty range outside the buffer
    #[error("Light range {start}..{end} exceeds buffer capacity {capacity}")]
    RangeOutOfBounds {
        /// First row of the range
        start: usize,
        /// One past the last row of the range
        end: usize,
        /// Buffer capacity in rows
        capacity: usize,
    },

    /// The backend rejected the upload
    #[error("Light buffer upload failed: {0}")]
    Upload(String),

    /// The buffer was terminated and its GPU storage released
    #[error("Light buffer used after termination")]
    Terminated,
}

/// Destination of committed light data
pub trait LightBufferSink {
    /// Copy `bytes` into GPU storage starting at `byte_offset`
    fn upload(&mut self, byte_offset: usize, bytes: &[u8]) -> Result<(), LightBufferError>;

    /// Free the GPU storage
    fn release(&mut self);
}

/// CPU staging array of packed light parameters
#[derive(Debug)]
pub struct GpuLightBuffer {
    lights: Vec<LightParameters>,
    light_count: usize,
    dirty: Option<Range<usize>>,
    generation: u64,
    terminated: bool,
}

impl GpuLightBuffer {
    /// Create a buffer holding up to `capacity` lights
    ///
    /// Capacities above [`MAX_LIGHT_COUNT`] are clamped.
    pub fn new(capacity: usize) -> Self {
        if capacity > MAX_LIGHT_COUNT {
            log::warn!(
                "Requested light capacity {} exceeds maximum {}, clamping",
                capacity,
                MAX_LIGHT_COUNT
            );
        }
        let capacity = capacity.min(MAX_LIGHT_COUNT);
        Self {
            lights: vec![LightParameters::default(); capacity],
            light_count: 0,
            dirty: None,
            generation: 0,
            terminated: false,
        }
    }

    /// Create a buffer sized from configuration
    pub fn from_config(config: &SceneConfig) -> Self {
        Self::new(config.light_capacity)
    }

    /// Maximum number of lights
    pub fn capacity(&self) -> usize {
        self.lights.len()
    }

    /// Number of lights written by the last light preparation
    pub fn light_count(&self) -> usize {
        self.light_count
    }

    pub(crate) fn set_light_count(&mut self, count: usize) {
        self.light_count = count.min(self.capacity());
    }

    /// Parameters of one light slot
    pub fn light_parameters(&self, index: usize) -> Option<&LightParameters> {
        self.lights.get(index)
    }

    /// Mutable parameters of one light slot
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`capacity`](Self::capacity).
    pub fn light_parameters_mut(&mut self, index: usize) -> &mut LightParameters {
        &mut self.lights[index]
    }

    /// Lights written by the last light preparation
    pub fn lights(&self) -> &[LightParameters] {
        &self.lights[..self.light_count]
    }

    /// Raw bytes of the whole staging array
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.lights)
    }

    /// Rows marked dirty and not yet committed
    pub fn dirty_range(&self) -> Option<Range<usize>> {
        self.dirty.clone()
    }

    /// Number of successful commits
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Mark `count` rows starting at `start` for upload on the next commit
    pub fn invalidate(&mut self, start: usize, count: usize) -> Result<(), LightBufferError> {
        let end = start + count;
        if end > self.capacity() {
            return Err(LightBufferError::RangeOutOfBounds {
                start,
                end,
                capacity: self.capacity(),
            });
        }
        if count == 0 {
            return Ok(());
        }
        self.dirty = Some(match self.dirty.take() {
            Some(range) => range.start.min(start)..range.end.max(end),
            None => start..end,
        });
        Ok(())
    }

    /// Upload the dirty rows and hand the buffer over to the backend
    ///
    /// On failure the dirty range is kept so a later commit retries it.
    pub fn commit(&mut self, sink: &mut dyn LightBufferSink) -> Result<(), LightBufferError> {
        if self.terminated {
            return Err(LightBufferError::Terminated);
        }
        if let Some(range) = self.dirty.take() {
            let stride = std::mem::size_of::<LightParameters>();
            let bytes = &self.as_bytes()[range.start * stride..range.end * stride];
            if let Err(err) = sink.upload(range.start * stride, bytes) {
                self.dirty = Some(range);
                return Err(err);
            }
        }
        self.generation += 1;
        Ok(())
    }

    /// Release the GPU storage; the buffer cannot be committed afterwards
    pub fn terminate(&mut self, sink: &mut dyn LightBufferSink) {
        if !self.terminated {
            sink.release();
            self.terminated = true;
            self.dirty = None;
        }
    }
}

impl Default for GpuLightBuffer {
    fn default() -> Self {
        Self::new(MAX_LIGHT_COUNT)
    }
}

/// Sink keeping uploaded light data in memory, for headless rendering
#[derive(Debug, Default)]
pub struct HeadlessLightSink {
    data: Vec<u8>,
    uploads: usize,
    released: bool,
}

impl HeadlessLightSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes received so far
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Uploaded data decoded as light parameters
    pub fn lights(&self) -> Vec<LightParameters> {
        self.data
            .chunks_exact(std::mem::size_of::<LightParameters>())
            .map(bytemuck::pod_read_unaligned)
            .collect()
    }

    /// Number of uploads performed
    pub fn upload_count(&self) -> usize {
        self.uploads
    }

    /// Whether the storage was released
    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl LightBufferSink for HeadlessLightSink {
    fn upload(&mut self, byte_offset: usize, bytes: &[u8]) -> Result<(), LightBufferError> {
        if self.released {
            return Err(LightBufferError::Upload("storage released".to_string()));
        }
        let end = byte_offset + bytes.len();
        if self.data.len() < end {
            self.data.resize(end, 0);
        }
        self.data[byte_offset..end].copy_from_slice(bytes);
        self.uploads += 1;
        Ok(())
    }

    fn release(&mut self) {
        self.data.clear();
        self.released = true;
    }
}
