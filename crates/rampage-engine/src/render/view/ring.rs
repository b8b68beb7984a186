//! Per-frame uniform regions.
//!
//! One buffer holds `frames_in_flight` copies of the uniform block, each at an
//! offset aligned for dynamic binding. Frame `n` writes region `n % regions`, so
//! the host never overwrites a block the GPU may still be reading for one of the
//! previous `regions - 1` frames.

use anyhow::Result;
use rampage_contract::{Uniforms, UNIFORMS_SIZE};

use crate::render::RenderCtx;

/// Rounds `size` up to a multiple of `align` (a power of two).
pub fn aligned_stride(size: u64, align: u64) -> u64 {
    debug_assert!(align.is_power_of_two());
    (size + align - 1) & !(align - 1)
}

/// Region bookkeeping, independent of any GPU object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingCursor {
    stride: u64,
    regions: u32,
    current: u32,
}

impl RingCursor {
    pub fn new(block_size: u64, offset_alignment: u64, regions: u32) -> Result<Self> {
        anyhow::ensure!(regions > 0, "uniform ring needs at least one region");
        anyhow::ensure!(
            offset_alignment.is_power_of_two(),
            "uniform offset alignment {offset_alignment} is not a power of two"
        );
        let stride = aligned_stride(block_size, offset_alignment);
        // Dynamic offsets are u32; the last region must still be addressable.
        let last_offset = stride
            .checked_mul(u64::from(regions - 1))
            .filter(|&o| o <= u64::from(u32::MAX));
        anyhow::ensure!(
            last_offset.is_some(),
            "{regions} uniform regions of {stride} bytes exceed the dynamic offset range"
        );
        Ok(Self { stride, regions, current: 0 })
    }

    pub fn stride(&self) -> u64 {
        self.stride
    }

    pub fn regions(&self) -> u32 {
        self.regions
    }

    /// Total bytes backing every region.
    pub fn buffer_size(&self) -> u64 {
        self.stride * u64::from(self.regions)
    }

    /// Index of the region the next write goes to.
    pub fn current(&self) -> u32 {
        self.current
    }

    /// Byte offset of the current region; also the dynamic offset to bind.
    pub fn offset(&self) -> u32 {
        let offset = self.stride * u64::from(self.current);
        // `new` bounds the last region's offset to u32.
        u32::try_from(offset).unwrap_or(u32::MAX)
    }

    /// Moves to the next region, wrapping after the last one.
    pub fn advance(&mut self) {
        self.current = (self.current + 1) % self.regions;
    }
}

/// GPU buffer carrying one uniform block per frame in flight.
pub struct UniformRing {
    buffer: wgpu::Buffer,
    cursor: RingCursor,
}

impl UniformRing {
    pub fn new(ctx: &RenderCtx<'_>, frames_in_flight: u32) -> Result<Self> {
        let align = ctx.uniform_offset_alignment();
        let cursor = RingCursor::new(UNIFORMS_SIZE as u64, align, frames_in_flight)?;
        let max_size = ctx.max_buffer_size();
        anyhow::ensure!(
            cursor.buffer_size() <= max_size,
            "uniform ring of {frames_in_flight} regions needs {} bytes, device allows {max_size}",
            cursor.buffer_size()
        );

        let buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("rampage view uniform ring"),
            size: cursor.buffer_size(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        log::debug!(
            "UniformRing: {} regions, stride {} bytes",
            cursor.regions(),
            cursor.stride()
        );

        Ok(Self { buffer, cursor })
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Writes `uniforms` into the current region and returns its dynamic offset.
    pub fn write(&self, queue: &wgpu::Queue, uniforms: &Uniforms) -> u32 {
        let offset = self.cursor.offset();
        queue.write_buffer(&self.buffer, u64::from(offset), uniforms.as_bytes());
        offset
    }

    pub fn advance(&mut self) {
        self.cursor.advance();
    }

    pub fn cursor(&self) -> &RingCursor {
        &self.cursor
    }
}
