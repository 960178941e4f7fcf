//! ADB bridge to the emulator
//!
//! Runs external commands with a hard timeout and exposes the emulator's
//! screen and display size through `adb`.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;

use image::{ImageFormat, RgbaImage};
use wait_timeout::ChildExt;

use super::WindowLocator;
use crate::config::settings::DeviceSettings;
use crate::vision::{Resolution, Screen, ScreenRect};

/// Failures talking to the device or its helper tools
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("`{command}` timed out after {}ms", .after.as_millis())]
    Timeout { command: String, after: Duration },
    #[error("`{command}` exited with {status:?}: {stderr}")]
    Failed {
        command: String,
        status: Option<i32>,
        stderr: String,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Failed to process image: {0}")]
    Image(#[from] image::ImageError),
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> thread::JoinHandle<io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            pipe.read_to_end(&mut buf)?;
        }
        Ok(buf)
    })
}

fn joined(handle: thread::JoinHandle<io::Result<Vec<u8>>>) -> io::Result<Vec<u8>> {
    handle
        .join()
        .unwrap_or_else(|_| Err(io::Error::other("pipe reader panicked")))
}

/// Run `program` to completion and return its stdout
///
/// Output pipes are drained on their own threads so large outputs (a PNG
/// screenshot) can't stall the child while we wait on it.
pub fn run_command(
    program: &Path,
    args: &[String],
    stdin: Option<&[u8]>,
    timeout: Duration,
) -> Result<Vec<u8>, DeviceError> {
    let command = format!("{} {}", program.display(), args.join(" "));
    log::trace!("Running {}", command);

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(|source| DeviceError::Spawn {
        program: program.display().to_string(),
        source,
    })?;

    let writer = match (stdin, child.stdin.take()) {
        (Some(bytes), Some(mut pipe)) => {
            let bytes = bytes.to_vec();
            Some(thread::spawn(move || pipe.write_all(&bytes)))
        }
        _ => None,
    };
    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let Some(status) = child.wait_timeout(timeout)? else {
        let _ = child.kill();
        let _ = child.wait();
        return Err(DeviceError::Timeout {
            command,
            after: timeout,
        });
    };

    if let Some(writer) = writer {
        if let Ok(Err(e)) = writer.join() {
            log::debug!("Writing stdin of `{}` failed: {}", command, e);
        }
    }
    let stdout = joined(stdout)?;
    let stderr = joined(stderr)?;

    if !status.success() {
        return Err(DeviceError::Failed {
            command,
            status: status.code(),
            stderr: String::from_utf8_lossy(&stderr).trim().to_string(),
        });
    }
    Ok(stdout)
}

/// Handle on one emulator reachable through `adb`
#[derive(Debug, Clone)]
pub struct Adb {
    program: PathBuf,
    serial: Option<String>,
    timeout: Duration,
}

impl Adb {
    pub fn new(settings: &DeviceSettings) -> Self {
        Self {
            program: settings.adb_path.clone(),
            serial: settings.device_serial.clone(),
            timeout: Duration::from_millis(settings.command_timeout_ms),
        }
    }

    fn args(&self, args: &[&str]) -> Vec<String> {
        let mut full = Vec::with_capacity(args.len() + 2);
        if let Some(serial) = &self.serial {
            full.push("-s".to_string());
            full.push(serial.clone());
        }
        full.extend(args.iter().map(|a| a.to_string()));
        full
    }

    /// Run an adb subcommand and return raw stdout
    pub fn run(&self, args: &[&str]) -> Result<Vec<u8>, DeviceError> {
        run_command(&self.program, &self.args(args), None, self.timeout)
    }

    /// Run a shell command on the device and return its output as text
    pub fn shell(&self, args: &[&str]) -> Result<String, DeviceError> {
        let mut full = Vec::with_capacity(args.len() + 1);
        full.push("shell");
        full.extend_from_slice(args);
        let out = self.run(&full)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

impl Screen for Adb {
    fn grab(&mut self) -> Result<RgbaImage, DeviceError> {
        let png = self.run(&["exec-out", "screencap", "-p"])?;
        let frame = image::load_from_memory_with_format(&png, ImageFormat::Png)?;
        Ok(frame.to_rgba8())
    }
}

impl WindowLocator for Adb {
    fn locate(&mut self) -> Result<Option<ScreenRect>, DeviceError> {
        let out = self.shell(&["wm", "size"])?;
        Ok(parse_wm_size(&out).map(|(w, h)| window_for_display(w, h)))
    }

    fn reshape(&mut self, rect: ScreenRect) -> Result<(), DeviceError> {
        let (width, height) = match Resolution::from_size(rect.width, rect.height) {
            Some(resolution) => resolution.display_size(),
            None => (rect.width, rect.height),
        };
        let size = format!("{}x{}", width, height);
        log::info!("Resizing emulator display to {}", size);
        self.shell(&["wm", "size", &size])?;
        Ok(())
    }
}

/// The emulator window around an Android display of the given size
///
/// Layout is measured from the top-left of the emulator window, whose
/// title bar sits above the display and whose toolbar sits to its right.
/// A display of a supported size is therefore placed one chrome height
/// above the window origin. Other sizes are reported as they are.
pub fn window_for_display(width: i32, height: i32) -> ScreenRect {
    match Resolution::from_display_size(width, height) {
        Some(resolution) => {
            let chrome = resolution.chrome();
            ScreenRect::new(0, -chrome, width + chrome, height + chrome)
        }
        None => ScreenRect::new(0, 0, width, height),
    }
}

/// Display size from `wm size` output, preferring an override over the
/// physical size
pub fn parse_wm_size(output: &str) -> Option<(i32, i32)> {
    let mut physical = None;
    let mut overridden = None;
    for line in output.lines() {
        let Some((label, value)) = line.split_once(':') else {
            continue;
        };
        let Some((w, h)) = value.trim().split_once('x') else {
            continue;
        };
        let (Ok(w), Ok(h)) = (w.trim().parse(), h.trim().parse()) else {
            continue;
        };
        if label.contains("Override") {
            overridden = Some((w, h));
        } else if label.contains("Physical") {
            physical = Some((w, h));
        }
    }
    overridden.or(physical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::layout;
    use crate::vision::{ScaleContext, ScreenPoint};

    #[test]
    fn test_display_sits_below_window_chrome() {
        assert_eq!(window_for_display(391, 694), ScreenRect::new(0, -32, 423, 726));
        assert_eq!(window_for_display(609, 1081), ScreenRect::new(0, -50, 659, 1131));
        assert_eq!(window_for_display(800, 600), ScreenRect::new(0, 0, 800, 600));
    }

    #[test]
    fn test_layout_lands_on_display_pixels() {
        let window = window_for_display(391, 694);
        let ctx = ScaleContext::new(window, Resolution::Low);

        assert_eq!(ctx.to_absolute(layout::SHAFT_UP_ARROW), ScreenPoint::new(25, 571));
        assert_eq!(ctx.game_rect(), ScreenRect::new(0, 0, 391, 694));
    }

    #[test]
    fn test_parse_physical_size() {
        assert_eq!(parse_wm_size("Physical size: 423x726\n"), Some((423, 726)));
    }

    #[test]
    fn test_parse_prefers_override() {
        let out = "Physical size: 1080x1920\nOverride size: 659x1131\n";
        assert_eq!(parse_wm_size(out), Some((659, 1131)));
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(parse_wm_size("error: no devices/emulators found"), None);
        assert_eq!(parse_wm_size(""), None);
    }

    #[test]
    fn test_serial_is_prepended() {
        let settings = DeviceSettings {
            device_serial: Some("emulator-5554".to_string()),
            ..DeviceSettings::default()
        };
        let adb = Adb::new(&settings);
        assert_eq!(
            adb.args(&["shell", "wm", "size"]),
            vec!["-s", "emulator-5554", "shell", "wm", "size"]
        );
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let err = run_command(
            Path::new("/definitely/not/a/real/adb"),
            &[],
            None,
            Duration::from_secs(1),
        )
        .unwrap_err();
        assert!(matches!(err, DeviceError::Spawn { .. }));
    }
}
