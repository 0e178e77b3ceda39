use safiri_shared::TripRequest;

/// Closure notification handed to the widget. Best-effort: the widget may
/// drop it without ever calling it, so callers must not rely on it firing.
pub type CloseCallback = Box<dyn FnOnce() + Send + 'static>;

/// Contract with the externally-injected SafariYetu booking widget.
///
/// The widget is an opaque third-party system: `is_available` is the
/// presence check for its global entry point (false means "not loaded yet",
/// a retryable condition, not a permanent failure), and `dialog_present`
/// reports whether its UI markers currently exist in the page — the signal
/// the presence monitor uses to infer closure when `on_close` never fires.
#[async_trait::async_trait]
pub trait BookingWidget: Send + Sync {
    fn is_available(&self) -> bool;

    fn dialog_present(&self) -> bool;

    /// Open the booking dialog for `request`. Errors here are interaction
    /// failures; the caller treats them the same as a user-closed dialog.
    async fn open(
        &self,
        request: &TripRequest,
        on_close: CloseCallback,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
