use std::{
    fs::{self, OpenOptions},
    io::{Read, Write},
    path::PathBuf,
};

use super::{io_to_generic_error, ReadSlotState, Storage, StorageError, StorageResult};

pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn get_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", key))
    }

    fn get_temp_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!(".{}.json.tmp", key))
    }
}

impl Storage for FileStorage {
    fn init(&self) -> StorageResult<()> {
        fs::create_dir_all(&self.base_path)
            .map_err(|e| StorageError::UnableToInitializeStorage(io_to_generic_error(e)))
    }

    fn read_slot(&self, key: &str) -> StorageResult<ReadSlotState> {
        let mut file = match OpenOptions::new().read(true).open(self.get_path(key)) {
            Ok(file) => file,
            Err(err) => match err.kind() {
                std::io::ErrorKind::NotFound => return Ok(ReadSlotState::NotFound),
                _ => {
                    return Err(StorageError::UnableToReadSlot(
                        key.to_string(),
                        io_to_generic_error(err),
                    ))
                }
            },
        };

        let mut buf = Vec::new();

        file.read_to_end(&mut buf)
            .map_err(|e| StorageError::UnableToReadSlot(key.to_string(), io_to_generic_error(e)))?;

        Ok(ReadSlotState::Found(buf))
    }

    // Written to a temp file first so a failed write never leaves a truncated slot behind
    fn write_slot(&self, key: &str, bytes: &[u8]) -> StorageResult<()> {
        let write_error =
            |e: std::io::Error| StorageError::UnableToWriteSlot(key.to_string(), io_to_generic_error(e));

        let temp_path = self.get_temp_path(key);

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .map_err(write_error)?;

        file.write_all(bytes).map_err(write_error)?;
        file.sync_all().map_err(write_error)?;

        fs::rename(&temp_path, self.get_path(key)).map_err(write_error)
    }
}
