const UNITS: [&str; 9] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB", "ZiB", "YiB"];

/// Byte counts shared by a single file and a whole collection.
///
/// Nothing is cached, every call recomputes from the current entries.
pub trait ByteMeasure {
    /// Declared size in bytes.
    fn size(&self) -> u64;

    /// Bytes believed to be uploaded, 0 before an upload starts.
    fn uploaded_size(&self) -> u64;

    /// Size rendered with a binary unit, e.g. `1.00 KiB`.
    fn human_size(&self) -> String {
        human_size(self.size())
    }

    /// Uploaded fraction in `[0, 1]`. Zero sized measures report `0.0`.
    fn percent_uploaded(&self) -> f64 {
        match self.size() {
            0 => 0.0,
            size => self.uploaded_size() as f64 / size as f64,
        }
    }
}

/// Render `bytes` with two decimals in the largest binary unit not above it.
///
/// `0` renders as `0.00 B`.
pub fn human_size(bytes: u64) -> String {
    let index = match bytes {
        0 => 0,
        bytes => (bytes.ilog(1024) as usize).min(UNITS.len() - 1),
    };
    let scaled = bytes as f64 / 1024f64.powi(index as i32);
    format!("{scaled:.2} {}", UNITS[index])
}
