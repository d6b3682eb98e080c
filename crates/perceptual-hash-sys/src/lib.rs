//! Raw bindings to the pHash perceptual hashing library.
//!
//! pHash exposes a C++ API, so the build script compiles a small shim
//! (`csrc/phash_shim.cpp`) that re-exports the entry points used here with C
//! linkage and an explicit `int` status. `0` means success; anything else is
//! the native failure signal, usually `errno`.
//!
//! Nothing in this crate is safe to call directly. Use `perceptual-hash-core`.

#![allow(non_camel_case_types)]

use std::ffi::{c_char, c_double, c_int};

/// pHash's 64-bit hash word.
pub type ulong64 = u64;

extern "C" {
    /// DCT image hash of the file at `file`. Writes the hash to `out`.
    pub fn phash_rs_dct_imagehash(file: *const c_char, out: *mut ulong64) -> c_int;

    /// DCT video hash of the file at `file`.
    ///
    /// On return `*out` may point at a `malloc`-allocated array of `*length`
    /// hashes. The caller owns it and must release it with
    /// [`phash_rs_free_hashes`], whatever the returned status.
    pub fn phash_rs_dct_videohash(
        file: *const c_char,
        out: *mut *mut ulong64,
        length: *mut c_int,
    ) -> c_int;

    /// Release an array returned by [`phash_rs_dct_videohash`]. Null is a no-op.
    pub fn phash_rs_free_hashes(hashes: *mut ulong64);

    pub fn phash_rs_hamming_distance(a: ulong64, b: ulong64, out: *mut c_int) -> c_int;

    /// Distance between two video hashes. `threshold` is forwarded to pHash
    /// unchanged.
    pub fn phash_rs_dct_videohash_dist(
        a: *const ulong64,
        len_a: c_int,
        b: *const ulong64,
        len_b: c_int,
        threshold: c_int,
        out: *mut c_double,
    ) -> c_int;
}
