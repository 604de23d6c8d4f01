use thiserror::Error;

/// Errors shown to the user below the search form.
///
/// Technical detail never reaches these variants; it is logged where the
/// failure is caught.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetError {
    /// Blank or whitespace-only search input.
    #[error("Please enter a valid location.")]
    InvalidLocation,

    /// Any transport, HTTP status or response-shape failure during a fetch.
    #[error("City not found. Please try again.")]
    CityNotFound,
}
