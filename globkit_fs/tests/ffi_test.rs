use globkit_core::string::globkit_free_string_buffer;
use globkit_fs::ffi::*;
use globkit_fs::GlobkitStatus;
use std::ffi::CString;
use std::fs;
use tempfile::TempDir;

fn c_path(path: &std::path::Path) -> CString {
    CString::new(path.to_str().unwrap()).unwrap()
}

#[test]
fn test_globkit_remove_pattern() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.tmp"), "x").unwrap();
    fs::write(temp_dir.path().join("b.keep"), "x").unwrap();

    let pattern = CString::new(format!("{}/*.tmp", temp_dir.path().to_str().unwrap())).unwrap();
    unsafe {
        assert_eq!(globkit_remove(pattern.as_ptr()), GlobkitStatus::Success);
    }
    assert!(!temp_dir.path().join("a.tmp").exists());
    assert!(temp_dir.path().join("b.keep").exists());
}

#[test]
fn test_globkit_remove_missing_directory() {
    let temp_dir = TempDir::new().unwrap();
    let pattern = CString::new(format!("{}/nope/*", temp_dir.path().to_str().unwrap())).unwrap();
    unsafe {
        assert_eq!(globkit_remove(pattern.as_ptr()), GlobkitStatus::PathNotFound);
    }
}

#[test]
fn test_globkit_purge_content() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("sub")).unwrap();
    fs::write(temp_dir.path().join("sub/file.txt"), "x").unwrap();
    fs::write(temp_dir.path().join(".dot"), "x").unwrap();

    let path = c_path(temp_dir.path());
    unsafe {
        assert_eq!(globkit_purge(path.as_ptr(), 2), GlobkitStatus::Success);
    }
    assert!(temp_dir.path().is_dir());
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_globkit_make_and_remove_dir() {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("a/b");
    let path = c_path(&nested);

    unsafe {
        assert_eq!(globkit_make_dir(path.as_ptr(), false, 0, 0), GlobkitStatus::PathNotFound);
        assert_eq!(globkit_make_dir(path.as_ptr(), true, 0, 0), GlobkitStatus::Success);
        assert_eq!(globkit_make_dir(path.as_ptr(), true, 1, 0), GlobkitStatus::Success);
        assert!(nested.is_dir());

        assert_eq!(globkit_remove_dir(path.as_ptr(), false), GlobkitStatus::Success);
        assert_eq!(globkit_remove_dir(path.as_ptr(), false), GlobkitStatus::Success);
    }
    assert!(!nested.exists());
}

#[test]
fn test_globkit_remove_dir_chain() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("x/y/z")).unwrap();

    let path = CString::new("x/y/z").unwrap();
    let root = c_path(temp_dir.path());
    unsafe {
        assert_eq!(
            globkit_remove_dir_chain(path.as_ptr(), root.as_ptr(), false),
            GlobkitStatus::Success
        );
    }
    assert!(!temp_dir.path().join("x").exists());
}

#[test]
fn test_globkit_remove_dir_not_empty() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("f"), "x").unwrap();
    let path = c_path(temp_dir.path());

    unsafe {
        assert_eq!(globkit_remove_dir(path.as_ptr(), true), GlobkitStatus::Incomplete);
        assert_ne!(globkit_remove_dir(path.as_ptr(), false), GlobkitStatus::Success);
    }
}

#[test]
fn test_globkit_provision_json() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("made");
    let json = serde_json::json!({ "path": target, "chain": true }).to_string();
    let json = CString::new(json).unwrap();

    unsafe {
        assert_eq!(globkit_provision_json(json.as_ptr()), GlobkitStatus::Success);
        let bad = CString::new("{not json").unwrap();
        assert_eq!(globkit_provision_json(bad.as_ptr()), GlobkitStatus::JsonError);
    }
    assert!(target.is_dir());
}

#[test]
fn test_globkit_list_entries_json() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.py"), "x").unwrap();
    fs::write(temp_dir.path().join(".hidden.py"), "x").unwrap();
    fs::create_dir(temp_dir.path().join("pkg")).unwrap();

    let pattern = CString::new(format!("{}/*", temp_dir.path().to_str().unwrap())).unwrap();
    unsafe {
        let mut buffer = globkit_list_entries_json(pattern.as_ptr(), 0, 2);
        assert!(buffer.is_valid());
        let names: Vec<String> = serde_json::from_str(buffer.as_str().unwrap()).unwrap();
        assert_eq!(names, vec!["a.py".to_string()]);
        globkit_free_string_buffer(&mut buffer);

        let mut buffer = globkit_list_entries_json(pattern.as_ptr(), 0, 1);
        let names: Vec<String> = serde_json::from_str(buffer.as_str().unwrap()).unwrap();
        assert_eq!(names, vec!["pkg".to_string()]);
        globkit_free_string_buffer(&mut buffer);
    }
}

#[test]
fn test_globkit_init_logging_once() {
    // A second install always fails, whichever call came first
    globkit_init_logging();
    assert!(!globkit_init_logging());
}
