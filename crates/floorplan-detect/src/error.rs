/// Errors returned by the room detector.
///
/// "No rooms found" is *not* an error: the detector reports it as an empty
/// result and the user proceeds to add rooms manually.
#[derive(thiserror::Error, Debug)]
pub enum DetectError {
    /// No working raster could be built from the input view: the view is
    /// empty or its buffer length does not match its dimensions. Fatal for
    /// detection; the caller falls back to manual room creation.
    #[error("cannot obtain a working raster (width={width}, height={height}, buffer={len} bytes)")]
    RasterUnavailable {
        width: usize,
        height: usize,
        len: usize,
    },

    /// The run was superseded by a newer detection request.
    #[error("detection cancelled")]
    Cancelled,
}
