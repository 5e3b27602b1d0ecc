//! Buffer marshalling between Rust strings and the host's fixed buffers.
//!
//! The host owns every buffer and passes a capacity; copies are pessimistic
//! in the original interface's sense: truncate to fit, always terminate,
//! never write past the capacity. The unsafe surface is confined to the
//! pointer-to-slice conversions at the bottom of this module; everything
//! above them operates on plain slices and is tested directly.

use std::ffi::CStr;

use libc::{c_char, c_int, c_void};

/// Copies `text` into a NUL-terminated narrow buffer, truncating to fit.
///
/// Bytes are copied verbatim; field names and units are ASCII so no code
/// conversion is needed. An empty destination is left untouched.
pub fn copy_narrow(dst: &mut [u8], text: &str) {
    let Some(limit) = dst.len().checked_sub(1) else {
        return;
    };
    let mut written = 0;
    for (slot, byte) in dst.iter_mut().zip(text.bytes().take(limit)) {
        *slot = byte;
        written += 1;
    }
    if let Some(terminator) = dst.get_mut(written) {
        *terminator = 0;
    }
}

/// Copies `text` into a NUL-terminated UTF-16 buffer, truncating to fit.
pub fn copy_wide(dst: &mut [u16], text: &str) {
    let Some(limit) = dst.len().checked_sub(1) else {
        return;
    };
    let mut written = 0;
    for (slot, unit) in dst.iter_mut().zip(text.encode_utf16().take(limit)) {
        *slot = unit;
        written += 1;
    }
    if let Some(terminator) = dst.get_mut(written) {
        *terminator = 0;
    }
}

/// Writes a 32-bit value into the destination buffer.
///
/// Returns `false` when the buffer cannot hold the value.
#[expect(
    clippy::host_endian_bytes,
    reason = "the host reads the value back in native byte order"
)]
pub fn copy_numeric(dst: &mut [u8], value: i32) -> bool {
    let bytes = value.to_ne_bytes();
    match dst.get_mut(..bytes.len()) {
        Some(slot) => {
            slot.copy_from_slice(&bytes);
            true
        }
        None => false,
    }
}

/// Reads a NUL-terminated narrow buffer into an owned string.
///
/// Stops at the first NUL or the end of the array, whichever comes first.
pub fn narrow_array_to_string(chars: &[c_char]) -> String {
    let bytes: Vec<u8> = chars
        .iter()
        .take_while(|&&c| c != 0)
        .map(|&c| c as u8)
        .collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Views a host-owned narrow output buffer as a byte slice.
///
/// Returns `None` for a null pointer or a non-positive capacity.
///
/// # Safety
///
/// `ptr`, when non-null, must point to at least `maxlen` writable bytes
/// that stay valid for the returned lifetime.
pub unsafe fn narrow_out<'a>(ptr: *mut c_char, maxlen: c_int) -> Option<&'a mut [u8]> {
    if ptr.is_null() {
        return None;
    }
    let len = usize::try_from(maxlen).ok().filter(|&len| len > 0)?;
    // SAFETY: non-null and sized per the caller's contract.
    Some(unsafe { std::slice::from_raw_parts_mut(ptr.cast::<u8>(), len) })
}

/// Views a host-owned wide output buffer as a UTF-16 unit slice.
///
/// `maxlen` counts 16-bit units, not bytes. Returns `None` for a null
/// pointer or a non-positive capacity.
///
/// # Safety
///
/// `ptr`, when non-null, must point to at least `maxlen` writable 16-bit
/// units that stay valid for the returned lifetime.
pub unsafe fn wide_out<'a>(ptr: *mut u16, maxlen: c_int) -> Option<&'a mut [u16]> {
    if ptr.is_null() {
        return None;
    }
    let len = usize::try_from(maxlen).ok().filter(|&len| len > 0)?;
    // SAFETY: non-null and sized per the caller's contract.
    Some(unsafe { std::slice::from_raw_parts_mut(ptr, len) })
}

/// Views a host-owned untyped value buffer as a byte slice.
///
/// # Safety
///
/// `ptr`, when non-null, must point to at least `maxlen` writable bytes
/// that stay valid for the returned lifetime.
pub unsafe fn value_out<'a>(ptr: *mut c_void, maxlen: c_int) -> Option<&'a mut [u8]> {
    // SAFETY: forwarded unchanged to the narrow view.
    unsafe { narrow_out(ptr.cast::<c_char>(), maxlen) }
}

/// Reads a NUL-terminated narrow string supplied by the host.
///
/// # Safety
///
/// `ptr`, when non-null, must point to a NUL-terminated buffer.
pub unsafe fn narrow_in(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    // SAFETY: non-null and NUL-terminated per the caller's contract.
    let text = unsafe { CStr::from_ptr(ptr) };
    Some(text.to_string_lossy().into_owned())
}

/// Reads a NUL-terminated UTF-16 string supplied by the host.
///
/// Unpaired surrogates are replaced rather than rejected.
///
/// # Safety
///
/// `ptr`, when non-null, must point to a NUL-terminated buffer of 16-bit
/// units.
pub unsafe fn wide_in(ptr: *const u16) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    let mut len = 0usize;
    // SAFETY: in-bounds while no terminator has been seen, per the
    // caller's contract.
    while unsafe { *ptr.add(len) } != 0 {
        len += 1;
    }
    // SAFETY: `len` units were just observed before the terminator.
    let units = unsafe { std::slice::from_raw_parts(ptr, len) };
    Some(String::from_utf16_lossy(units))
}

/// Reads a host-supplied 32-bit value.
///
/// # Safety
///
/// `ptr`, when non-null, must point to at least four readable bytes.
pub const unsafe fn numeric_in(ptr: *const c_void) -> Option<i32> {
    if ptr.is_null() {
        return None;
    }
    // SAFETY: non-null and at least four bytes per the caller's contract.
    Some(unsafe { ptr.cast::<i32>().read_unaligned() })
}
