//! Fuzz target for the whole conversion pipeline.
//!
//! Anything the parser accepts is pushed through road building and XML
//! serialization with resampling and bounds enabled.

#![no_main]

use lanelet2xodr::conversion::fuzz_convert_slice;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = fuzz_convert_slice(data);
});
