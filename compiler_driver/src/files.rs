// Path manipulation used to derive the output `.s` file name from the
// input source path. Compiling/assembling/linking the emitted assembly is
// outside this tool's scope; the host toolchain does that with the file
// this module names.

/// remove the file extension from a path
pub fn remove_file_extension(file_path: &str) -> &str {
    let dot_index = file_path.rfind('.').expect("invalid source file name");
    &file_path[..dot_index]
}

/// return a new path with the new file name
pub fn set_file_name(file_path: &str, file_name: &str) -> String {
    let mut path: Vec<&str> = file_path.split('/').collect();
    path.pop();

    let mut new_path = String::new();
    for item in path {
        new_path.push_str(item);
        new_path.push('/');
    }

    new_path.push_str(file_name);
    new_path
}

/// return a reference to the file name
pub fn get_file_name(file_path: &str) -> &str {
    let path: Vec<&str> = file_path.split('/').collect();
    path.last().expect("failed to fetch file name")
}
