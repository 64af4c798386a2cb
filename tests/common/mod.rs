//! Shared test utilities and fixture generators

#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use office_tweaks::convert::{ConversionEngine, Direction, EngineError};
use office_tweaks::files::FileManager;
use office_tweaks::report::{Cancellation, Reporter};
use tempfile::TempDir;

/// Write `contents` to `dir/name` and return the path
pub fn create_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// A temp directory plus a FileManager pointed at it
pub fn workspace() -> (TempDir, FileManager) {
    let temp_dir = TempDir::new().unwrap();
    let files = FileManager::with_directory(temp_dir.path(), Reporter::quiet()).unwrap();
    (temp_dir, files)
}

/// Sorted file names in `dir`
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Engine stand-in: copies the input and fails for inputs whose name
/// contains "broken". An engine built with [`FakeEngine::interrupting`]
/// raises Ctrl+C while converting a file whose name contains "stop".
pub struct FakeEngine {
    available: bool,
    interrupt: Option<Cancellation>,
    pub calls: Rc<RefCell<Vec<PathBuf>>>,
}

impl FakeEngine {
    pub fn working() -> Self {
        Self {
            available: true,
            interrupt: None,
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn missing() -> Self {
        Self {
            available: false,
            ..Self::working()
        }
    }

    pub fn interrupting(cancellation: &Cancellation) -> Self {
        Self {
            interrupt: Some(cancellation.clone()),
            ..Self::working()
        }
    }
}

impl ConversionEngine for FakeEngine {
    fn name(&self) -> &str {
        "FakeOffice"
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn convert(&self, input: &Path, output: &Path, _direction: Direction) -> Result<(), EngineError> {
        self.calls.borrow_mut().push(input.to_path_buf());
        if !self.available {
            return Err(EngineError::Unavailable);
        }
        let name = input.file_name().unwrap().to_string_lossy();
        if let Some(cancellation) = &self.interrupt {
            if name.contains("stop") {
                cancellation.request();
            }
        }
        if name.contains("broken") {
            return Err(EngineError::Failed("corrupt document".to_string()));
        }
        fs::copy(input, output).map_err(|e| EngineError::Failed(e.to_string()))?;
        Ok(())
    }
}

/// Deterministic noisy RGB pixels; noise compresses poorly at high quality
#[cfg(feature = "images")]
pub fn noisy_rgb(width: u32, height: u32) -> image::RgbImage {
    let mut state: u32 = 0x2545_f491;
    image::RgbImage::from_fn(width, height, |_, _| {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let [r, g, b, _] = state.to_le_bytes();
        image::Rgb([r, g, b])
    })
}
