//! FFI bindings for Workout Flux
//!
//! This module provides C-compatible functions for calling Flux from other languages.
//! All functions use C strings (null-terminated) and return allocated memory that
//! must be freed by the caller using `wflux_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;
use std::slice;

use crate::dispatch::read_package;
use crate::pipeline::{packages_to_messages, packages_to_report};
use crate::report::format_message;
use crate::workout::{Training, Workout};

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Set the last error message
fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

/// Clear the last error message
fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

// ============================================================================
// Batch API
// ============================================================================

/// Process a JSON array of packages and return a JSON array of report lines.
///
/// # Safety
/// - `json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `wflux_free_string`.
/// - Returns NULL on error; call `wflux_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn wflux_packages_to_messages(json: *const c_char) -> *mut c_char {
    clear_last_error();

    let json_str = match cstr_to_string(json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return ptr::null_mut();
        }
    };

    let lines = match packages_to_messages(json_str) {
        Ok(lines) => lines,
        Err(e) => {
            set_last_error(&e.to_string());
            return ptr::null_mut();
        }
    };

    match serde_json::to_string(&lines) {
        Ok(result) => string_to_cstr(&result),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Process a JSON array of packages and return a JSON report.
///
/// # Safety
/// - `json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `wflux_free_string`.
/// - Returns NULL on error; call `wflux_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn wflux_packages_to_report(json: *const c_char) -> *mut c_char {
    clear_last_error();

    let json_str = match cstr_to_string(json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return ptr::null_mut();
        }
    };

    match packages_to_report(json_str) {
        Ok(report) => string_to_cstr(&report),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Single Workout API
// ============================================================================

/// Opaque handle to a constructed workout
pub struct TrainingHandle {
    training: Training,
}

/// Build a workout from an activity code and `len` positional readings.
///
/// # Safety
/// - `code` must be a valid null-terminated C string.
/// - `data` must point to `len` readable doubles (may be NULL when `len` is 0).
/// - Returns a pointer that must be freed with `wflux_training_free`.
/// - Returns NULL for unknown codes and invalid readings; call `wflux_last_error`.
#[no_mangle]
pub unsafe extern "C" fn wflux_training_new(
    code: *const c_char,
    data: *const f64,
    len: usize,
) -> *mut TrainingHandle {
    clear_last_error();

    let code_str = match cstr_to_string(code) {
        Some(s) => s,
        None => {
            set_last_error("Invalid code string pointer");
            return ptr::null_mut();
        }
    };

    let readings: &[f64] = if len == 0 {
        &[]
    } else if data.is_null() {
        set_last_error("Null data pointer");
        return ptr::null_mut();
    } else {
        slice::from_raw_parts(data, len)
    };

    match read_package(&code_str, readings) {
        Ok(Some(training)) => Box::into_raw(Box::new(TrainingHandle { training })),
        Ok(None) => {
            set_last_error(&format!("Unknown workout type: {code_str}"));
            ptr::null_mut()
        }
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Free a workout handle.
///
/// # Safety
/// - `training` must be a valid pointer returned by `wflux_training_new`, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn wflux_training_free(training: *mut TrainingHandle) {
    if !training.is_null() {
        drop(Box::from_raw(training));
    }
}

/// Render the report line for a workout.
///
/// # Safety
/// - `training` must be a valid pointer returned by `wflux_training_new`.
/// - Returns a newly allocated string that must be freed with `wflux_free_string`.
/// - Returns NULL on error; call `wflux_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn wflux_training_message(training: *const TrainingHandle) -> *mut c_char {
    clear_last_error();

    if training.is_null() {
        set_last_error("Null training pointer");
        return ptr::null_mut();
    }

    let handle = &*training;
    string_to_cstr(&format_message(&handle.training.training_info()))
}

/// Return the computed result for a workout as JSON.
///
/// # Safety
/// - `training` must be a valid pointer returned by `wflux_training_new`.
/// - Returns a newly allocated string that must be freed with `wflux_free_string`.
/// - Returns NULL on error; call `wflux_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn wflux_training_info_json(training: *const TrainingHandle) -> *mut c_char {
    clear_last_error();

    if training.is_null() {
        set_last_error("Null training pointer");
        return ptr::null_mut();
    }

    let handle = &*training;
    match serde_json::to_string(&handle.training.training_info()) {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by Flux functions.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by a Flux function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn wflux_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Get the last error message.
///
/// # Safety
/// - Returns a pointer to a thread-local error string.
/// - The returned pointer is valid until the next Flux function call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn wflux_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

// ============================================================================
// Version Information
// ============================================================================

/// Get the Flux library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn wflux_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_packages_json() -> CString {
        CString::new(
            r#"[
                {"workout_type": "SWM", "data": [720, 1, 80, 25, 40]},
                {"workout_type": "RUN", "data": [15000, 1, 75]},
                {"workout_type": "XYZ", "data": [1, 2, 3]}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_ffi_packages_to_messages() {
        let json = sample_packages_json();

        unsafe {
            let result = wflux_packages_to_messages(json.as_ptr());
            assert!(!result.is_null());

            let result_str = CStr::from_ptr(result).to_str().unwrap();
            let lines: Vec<String> = serde_json::from_str(result_str).unwrap();
            assert_eq!(lines.len(), 3);
            assert!(lines[0].starts_with("Activity type: Swimming;"));
            assert_eq!(lines[2], crate::report::UNKNOWN_WORKOUT_MESSAGE);

            wflux_free_string(result);
        }
    }

    #[test]
    fn test_ffi_packages_to_report() {
        let json = sample_packages_json();

        unsafe {
            let result = wflux_packages_to_report(json.as_ptr());
            assert!(!result.is_null());

            let result_str = CStr::from_ptr(result).to_str().unwrap();
            let value: serde_json::Value = serde_json::from_str(result_str).unwrap();
            assert_eq!(value["outcomes"][2]["status"], "unknown");

            wflux_free_string(result);
        }
    }

    #[test]
    fn test_ffi_training_lifecycle() {
        let code = CString::new("RUN").unwrap();
        let data = [15000.0, 1.0, 75.0];

        unsafe {
            let training = wflux_training_new(code.as_ptr(), data.as_ptr(), data.len());
            assert!(!training.is_null());

            let message = wflux_training_message(training);
            assert!(!message.is_null());
            let message_str = CStr::from_ptr(message).to_str().unwrap();
            assert!(message_str.contains("Distance: 9.750 km"));
            wflux_free_string(message);

            let info = wflux_training_info_json(training);
            assert!(!info.is_null());
            let value: serde_json::Value =
                serde_json::from_str(CStr::from_ptr(info).to_str().unwrap()).unwrap();
            assert_eq!(value["activity_label"], "Running");
            wflux_free_string(info);

            wflux_training_free(training);
        }
    }

    #[test]
    fn test_ffi_error_handling() {
        unsafe {
            let invalid_json = CString::new("not json").unwrap();
            let result = wflux_packages_to_messages(invalid_json.as_ptr());
            assert!(result.is_null());
            assert!(!wflux_last_error().is_null());

            let code = CString::new("XYZ").unwrap();
            let training = wflux_training_new(code.as_ptr(), ptr::null(), 0);
            assert!(training.is_null());
            let error = CStr::from_ptr(wflux_last_error()).to_str().unwrap();
            assert!(error.contains("XYZ"));

            let code = CString::new("RUN").unwrap();
            let data = [15000.0, 0.0, 75.0];
            let training = wflux_training_new(code.as_ptr(), data.as_ptr(), data.len());
            assert!(training.is_null());
            let error = CStr::from_ptr(wflux_last_error()).to_str().unwrap();
            assert!(error.contains("duration"));
        }
    }

    #[test]
    fn test_ffi_version() {
        unsafe {
            let version = wflux_version();
            assert!(!version.is_null());

            let version_str = CStr::from_ptr(version).to_str().unwrap();
            assert!(!version_str.is_empty());
        }
    }
}
