use std::io::Write;

use tokio::sync::Mutex;

use crate::config::{Alerts, NotificationPermission};
use crate::model::Alert;

const MAX_SOUND_VOLUME: f32 = 0.3;

pub trait DesktopNotifier: Send + Sync {
    fn is_available(&self) -> bool;
    fn notify(&self, title: &str, body: &str) -> Result<(), String>;
}

pub trait SoundPlayer: Send + Sync {
    fn play(&self, volume: f32) -> std::io::Result<()>;
}

/// Notifier for headless sessions: the notification becomes a log record.
pub struct LogNotifier;

impl DesktopNotifier for LogNotifier {
    fn is_available(&self) -> bool {
        true
    }

    fn notify(&self, title: &str, body: &str) -> Result<(), String> {
        log::warn!("desktop_notification title={} body={}", title, body);
        Ok(())
    }
}

pub struct TerminalBell;

impl SoundPlayer for TerminalBell {
    fn play(&self, _volume: f32) -> std::io::Result<()> {
        let mut stderr = std::io::stderr().lock();
        stderr.write_all(b"\x07")?;
        stderr.flush()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CueOutcome {
    pub sound_played: bool,
    pub notified: bool,
}

/// Audible and desktop cues for urgent alerts. Cue failures never reach the
/// caller.
pub struct AlertCues {
    permission: Mutex<NotificationPermission>,
    notifier: Box<dyn DesktopNotifier>,
    sound: Box<dyn SoundPlayer>,
}

impl AlertCues {
    pub fn new(
        permission: NotificationPermission,
        notifier: Box<dyn DesktopNotifier>,
        sound: Box<dyn SoundPlayer>,
    ) -> Self {
        Self {
            permission: Mutex::new(permission),
            notifier,
            sound,
        }
    }

    pub fn terminal(permission: NotificationPermission) -> Self {
        Self::new(permission, Box::new(LogNotifier), Box::new(TerminalBell))
    }

    pub async fn permission(&self) -> NotificationPermission {
        *self.permission.lock().await
    }

    pub async fn set_permission(&self, permission: NotificationPermission) {
        *self.permission.lock().await = permission;
    }

    /// Resolves a `default` permission; once resolved, later calls return
    /// the stored answer.
    pub async fn request_permission_once(&self) -> NotificationPermission {
        let mut permission = self.permission.lock().await;
        if *permission == NotificationPermission::Default {
            *permission = if self.notifier.is_available() {
                NotificationPermission::Granted
            } else {
                NotificationPermission::Denied
            };
            log::info!("notification_permission_resolved state={:?}", *permission);
        }
        *permission
    }

    pub async fn announce(&self, alert: &Alert, settings: &Alerts) -> CueOutcome {
        let mut outcome = CueOutcome::default();

        if settings.sound_enabled {
            let volume = settings.sound_volume.clamp(0.0, MAX_SOUND_VOLUME);
            match self.sound.play(volume) {
                Ok(()) => outcome.sound_played = true,
                Err(error) => log::debug!("alert_sound_failed error={}", error),
            }
        }

        if self.permission().await == NotificationPermission::Granted {
            let body = format!("{}: {}", alert.title, alert.message);
            match self.notifier.notify(&settings.notification_title, &body) {
                Ok(()) => outcome.notified = true,
                Err(error) => log::debug!("desktop_notification_failed error={}", error),
            }
        }

        outcome
    }
}
