//! Matching-compression checks for the lzkn64 compressor.
//!
//! Compresses every file in an uncompressed directory with an external `lzkn64`
//! executable and compares the results byte for byte with a directory of
//! known-good compressed files. The compressor is treated as a black box.
//!
//! Basic usage, from the directory holding the test data:
//!
//! `$> lzkn64-verify --lzkn64 ../build/lzkn64 --verbose`
//!
//! This compresses `uncompressed/` into a scratch `recompressed/` directory,
//! compares it against `compressed/`, removes `recompressed/` and exits with 0
//! when everything matched, 1 otherwise.
//!
pub mod harness;
pub mod tools;
