//! Platform classification contracts and pure user-agent profiling.

use serde::{Deserialize, Serialize};

/// Pure classifier over a browser user-agent string.
///
/// All detection that can be answered from the UA string alone lives here so the logic stays
/// testable without a browser. Signals that need live DOM/media-query access (standalone display
/// mode, install-event support) are composed on top by the concrete [`PlatformProbe`].
#[derive(Debug, Clone, Copy)]
pub struct UaProfile<'a> {
    ua: &'a str,
}

impl<'a> UaProfile<'a> {
    /// Wraps a raw user-agent string.
    pub const fn new(ua: &'a str) -> Self {
        Self { ua }
    }

    /// iPhone, iPad, or iPod hardware.
    pub fn is_ios(self) -> bool {
        ["iPad", "iPhone", "iPod"].iter().any(|t| self.ua.contains(t))
    }

    /// Safari proper on iOS; Chrome-on-iOS (`CriOS`) and other shells are excluded because they
    /// cannot show the add-to-home-screen share sheet path we describe.
    pub fn is_ios_safari(self) -> bool {
        self.is_ios()
            && self.ua.contains("Safari")
            && !self.ua.contains("CriOS")
            && !self.ua.contains("Chrome")
    }

    /// Android device.
    pub fn is_android(self) -> bool {
        self.ua.contains("Android")
    }

    /// Any mobile platform we classify.
    pub fn is_mobile(self) -> bool {
        self.is_ios() || self.is_android()
    }

    /// macOS desktop.
    pub fn is_macos(self) -> bool {
        self.ua.contains("Macintosh") || self.ua.contains("MacIntel")
    }

    /// Windows desktop.
    pub fn is_windows(self) -> bool {
        self.ua.contains("Windows")
    }

    /// Linux desktop; Android carries a `Linux` token and is excluded.
    pub fn is_linux(self) -> bool {
        self.ua.contains("Linux") && !self.is_android()
    }
}

/// Snapshot of every platform-detection boolean exposed by the public surface.
///
/// Field names serialize to the JS-facing spelling so the snapshot can cross the wasm boundary
/// unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlatformSnapshot {
    /// iPhone/iPad/iPod hardware.
    #[serde(rename = "isIOS")]
    pub is_ios: bool,
    /// Safari proper on iOS.
    #[serde(rename = "isIOSSafari")]
    pub is_ios_safari: bool,
    /// Android device.
    #[serde(rename = "isAndroid")]
    pub is_android: bool,
    /// iOS or Android.
    #[serde(rename = "isMobile")]
    pub is_mobile: bool,
    /// macOS desktop.
    #[serde(rename = "isMacOS")]
    pub is_macos: bool,
    /// Windows desktop.
    #[serde(rename = "isWindows")]
    pub is_windows: bool,
    /// Non-Android Linux desktop.
    #[serde(rename = "isLinux")]
    pub is_linux: bool,
    /// Service workers plus either a native install-prompt event or the iOS guided path.
    #[serde(rename = "supportsPWA")]
    pub supports_pwa: bool,
    /// Already running as an installed app (standalone display mode).
    #[serde(rename = "isStandalone")]
    pub is_standalone: bool,
}

impl PlatformSnapshot {
    /// Builds the UA-derived portion of a snapshot; environment-derived fields
    /// (`supports_pwa`, `is_standalone`) start out `false` and are filled in by the probe.
    pub fn from_user_agent(ua: &str) -> Self {
        let profile = UaProfile::new(ua);
        Self {
            is_ios: profile.is_ios(),
            is_ios_safari: profile.is_ios_safari(),
            is_android: profile.is_android(),
            is_mobile: profile.is_mobile(),
            is_macos: profile.is_macos(),
            is_windows: profile.is_windows(),
            is_linux: profile.is_linux(),
            supports_pwa: false,
            is_standalone: false,
        }
    }
}

/// Host service classifying the running environment.
pub trait PlatformProbe {
    /// Returns the current platform-detection snapshot.
    fn snapshot(&self) -> PlatformSnapshot;
}

#[derive(Debug, Clone, Copy, Default)]
/// Probe returning a caller-supplied snapshot, for tests and unsupported targets.
pub struct FixedPlatformProbe {
    /// Snapshot handed back verbatim.
    pub snapshot: PlatformSnapshot,
}

impl FixedPlatformProbe {
    /// Probe reporting the given snapshot.
    pub const fn new(snapshot: PlatformSnapshot) -> Self {
        Self { snapshot }
    }
}

impl PlatformProbe for FixedPlatformProbe {
    fn snapshot(&self) -> PlatformSnapshot {
        self.snapshot
    }
}
