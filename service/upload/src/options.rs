use domain_upload::{
    exception::{UploadException, UploadResult},
    model::vo::SessionOptions,
};
use infrastructure_config::merge;
use serde_json::Value;

fn invalid(reason: impl ToString) -> UploadException {
    UploadException::InvalidOption {
        key: "options".to_owned(),
        reason: reason.to_string(),
    }
}

/// Merge `overlays` in order onto the default options and validate the result.
pub fn merge_options<I>(overlays: I) -> UploadResult<SessionOptions>
where
    I: IntoIterator<Item = Value>,
{
    let mut options = serde_json::to_value(SessionOptions::default()).map_err(invalid)?;
    for overlay in overlays {
        merge(&mut options, overlay).map_err(invalid)?;
    }
    serde_json::from_value::<SessionOptions>(options).map_err(invalid)?.validated()
}
