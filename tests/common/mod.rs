// Shared test helpers for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

/// Builds a library report like the one OpenModelicaLibraryTesting writes.
pub fn library_report_html(total: u32, simulated: u32, verified: u32) -> String {
    format!(
        r##"<!DOCTYPE html>
<html>
<head>
  <title>MyLibrary_main test using OpenModelica</title>
</head>
<body>
<h1>MyLibrary_main test using OpenModelica</h1>

<table>
<tr>
<th>Total</th>
<th>Frontend</th>
<th>Backend</th>
<th>SimCode</th>
<th>Templates</th>
<th>Compilation</th>
<th>Simulation</th>
<th>Verification</th>
</tr>
<tr>
<td>{total}</td>
<td bgcolor="#00FF00">{total}</td>
<td bgcolor="#00FF00">{total}</td>
<td bgcolor="#00FF00">{total}</td>
<td bgcolor="#00FF00">{total}</td>
<td bgcolor="#00FF00">{total}</td>
<td bgcolor="#00FF00">{simulated}</td>
<td bgcolor="#FFCC66">{verified}</td>
</tr>
</table>

<p>Total time taken: 0:00:08</p>
<p>Reference Files: /path/to/ReferenceFiles</p>
<table>
<tr><th>Model</th><th>Verified</th><th>Simulate</th><th>Total buildModel</th></tr>
<tr><td><a href="files/MyLibrary_main_MyLibrary.Blocks.Examples.PID_Controller.err">MyLibrary.Blocks.Examples.PID_Controller</a> (<a href="files/MyLibrary_main_MyLibrary.Blocks.Examples.PID_Controller.sim">sim</a>)</td><td bgcolor="#FFCC66">0.05 (<a href="files/MyLibrary_main_MyLibrary.Blocks.Examples.PID_Controller.diff.html">4/7 failed</a>)</td><td bgcolor="#00FF00">0.02</td><td bgcolor="#00FF00">1.52</td></tr>

<tr><td><a href="files/MyLibrary_main_MyLibrary.Mechanics.MultiBody.Examples.Pendulum.err">MyLibrary.Mechanics.MultiBody.Examples.Pendulum</a> (<a href="files/MyLibrary_main_MyLibrary.Mechanics.MultiBody.Examples.Pendulum.sim">sim</a>)</td><td bgcolor="#00FF00">0.01 (3 verified)</td><td bgcolor="#00FF00">0.06</td><td bgcolor="#00FF00">2.32</td></tr>

</table>
</body>
</html>
"##
    )
}

/// Writes `<dir>/<lib_name_branch>.html` and returns its path.
pub fn write_library_report(
    dir: &Path,
    lib_name_branch: &str,
    total: u32,
    simulated: u32,
    verified: u32,
) -> PathBuf {
    fs::create_dir_all(dir).expect("Failed to create report directory");
    let path = dir.join(format!("{lib_name_branch}.html"));
    fs::write(&path, library_report_html(total, simulated, verified))
        .expect("Failed to write library report");
    path
}

/// Model-specific files the runner writes into `files/`.
pub const MODEL_FILE_SUFFIXES: [&str; 7] = [
    "cmdout",
    "diff.html",
    "diff.x.csv",
    "diff.x.html",
    "err",
    "json",
    "sim",
];

/// Creates a runner output directory:
///
/// ```text
/// <root>/files/<model>.{cmdout,diff.html,...}
/// <root>/overview.html
/// <root>/<lib>_<ver>.html
/// <root>/dygraph-combined.js
/// ```
pub fn mock_runner_output(root: &Path, lib_name_branch: &str, model_prefix: &str) {
    let files = root.join("files");
    fs::create_dir_all(&files).expect("Failed to create files directory");
    for suffix in MODEL_FILE_SUFFIXES {
        let name = format!("{model_prefix}.{suffix}");
        fs::write(files.join(&name), &name).expect("Failed to write model file");
    }
    fs::write(root.join("overview.html"), "overview.html").expect("Failed to write overview");
    write_library_report(root, lib_name_branch, 2, 2, 1);
    fs::write(root.join("dygraph-combined.js"), "// dygraph").expect("Failed to write dygraph");
}

/// A temp dir with a mocked runner output for `MyLibrary` at `lib_name_branch`.
pub fn setup_runner_dir(lib_name_branch: &str) -> (TempDir, PathBuf) {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    let runner = temp_dir.path().join("OpenModelicaLibraryTesting");
    mock_runner_output(&runner, lib_name_branch, &format!("{lib_name_branch}_MyLibrary.Examples.M"));
    (temp_dir, runner)
}

/// Sorted file names directly inside `dir`.
pub fn sorted_file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("Failed to read directory")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
