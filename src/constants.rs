/// The fixed rate at which the ADC produces samples, before any decimation, in Hz.
pub const BASE_SAMPLE_RATE_HZ: u32 = 384_000;

/// Number of 24-bit samples in one DMA chunk, per channel.
///
/// Divisible by 2, 4, 8, and 16 so every supported output rate decimates a
/// full chunk into a whole number of samples.
pub const AUDIO_DMA_BUFF_LEN_IN_SAMPS: usize = 512 * 16;

/// Size of one DMA chunk in bytes. Samples occupy 3 bytes each on the wire.
pub const AUDIO_DMA_BUFF_LEN_IN_BYTES: usize = AUDIO_DMA_BUFF_LEN_IN_SAMPS * 3;

/// Time for the DMA engine to fill one chunk at the base rate, in microseconds.
pub const AUDIO_DMA_CHUNK_READY_PERIOD_MICROSECS: u32 =
    (AUDIO_DMA_BUFF_LEN_IN_SAMPS as u32 * 1_000) / (BASE_SAMPLE_RATE_HZ / 1_000);

/// Number of chunks in the circular DMA buffer, per channel.
pub const DMA_CHUNKS_PER_CHANNEL: usize = 4;
