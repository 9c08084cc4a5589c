/// Normalizes a `/`-separated path the way the document opener expects it.
///
/// Empty and `.` segments are dropped, `..` pops the previous segment when
/// there is one, and the result never starts or ends with a slash. A path
/// that resolves to the root becomes the empty string.
pub fn normalize_path(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match parts.last() {
                Some(last) if *last != ".." => {
                    parts.pop();
                }
                _ => parts.push(".."),
            },
            other => parts.push(other),
        }
    }
    parts.join("/")
}
