/// Spotify's web player, opened when no playback device is available.
pub const WEB_PLAYER_URL: &str = "https://open.spotify.com/";

/// Directs the user to a URL.
pub trait Notifier: Send + Sync {
    fn open(&self, url: &str) -> std::io::Result<()>;
}

/// Opens URLs in the default browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserNotifier;

impl Notifier for BrowserNotifier {
    fn open(&self, url: &str) -> std::io::Result<()> {
        webbrowser::open(url)
    }
}
