use std::ffi::OsStr;
use std::path::PathBuf;

/// Platform conventions that matter when looking for Java tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Other,
}

impl Platform {
    /// Anything whose OS name contains "windows" in any case counts as Windows.
    pub fn from_os_name(os_name: &str) -> Self {
        if os_name.to_lowercase().contains("windows") {
            Platform::Windows
        } else {
            Platform::Other
        }
    }

    pub fn is_windows(&self) -> bool {
        *self == Platform::Windows
    }

    pub fn javac_executable_name(&self) -> &'static str {
        match self {
            Platform::Windows => "javac.exe",
            Platform::Other => "javac",
        }
    }

    pub fn java_executable_name(&self) -> &'static str {
        match self {
            Platform::Windows => "java.exe",
            Platform::Other => "java",
        }
    }

    pub fn path_list_separator(&self) -> char {
        match self {
            Platform::Windows => ';',
            Platform::Other => ':',
        }
    }

    /// Splits a `PATH`-style listing, keeping order and the raw bytes of
    /// each entry. An empty entry becomes an empty path, which resolves
    /// against the current directory.
    pub fn split_path_list(&self, paths: &OsStr) -> Vec<PathBuf> {
        if paths.is_empty() {
            return Vec::new();
        }

        let separator = self.path_list_separator() as u8;
        paths
            .as_encoded_bytes()
            .split(|byte| *byte == separator)
            // SAFETY: the input is a valid OsStr and every split point is an ASCII byte.
            .map(|entry| PathBuf::from(unsafe { OsStr::from_encoded_bytes_unchecked(entry) }))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_os_name() {
        assert_eq!(Platform::from_os_name("Windows 10"), Platform::Windows);
        assert_eq!(Platform::from_os_name("windows"), Platform::Windows);
        assert_eq!(Platform::from_os_name("WINDOWS SERVER 2019"), Platform::Windows);
        assert_eq!(Platform::from_os_name("Linux"), Platform::Other);
        assert_eq!(Platform::from_os_name("Mac OS X"), Platform::Other);
        assert_eq!(Platform::from_os_name(""), Platform::Other);
    }

    #[test]
    fn test_executable_names() {
        assert_eq!(Platform::Windows.javac_executable_name(), "javac.exe");
        assert_eq!(Platform::Other.javac_executable_name(), "javac");
        assert_eq!(Platform::Windows.java_executable_name(), "java.exe");
        assert_eq!(Platform::Other.java_executable_name(), "java");
    }

    #[test]
    fn test_split_path_list_keeps_order() {
        let entries = Platform::Other.split_path_list(OsStr::new("/usr/local/bin::/usr/bin:/bin"));
        assert_eq!(
            entries,
            vec![
                PathBuf::from("/usr/local/bin"),
                PathBuf::new(),
                PathBuf::from("/usr/bin"),
                PathBuf::from("/bin"),
            ]
        );

        let entries = Platform::Windows.split_path_list(OsStr::new(r"C:\Java\bin;C:\Windows"));
        assert_eq!(entries, vec![PathBuf::from(r"C:\Java\bin"), PathBuf::from(r"C:\Windows")]);
    }

    #[test]
    fn test_split_empty_path_list() {
        assert!(Platform::Other.split_path_list(OsStr::new("")).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_split_path_list_keeps_non_utf8_entries() {
        use std::os::unix::ffi::OsStrExt;

        let entries = Platform::Other.split_path_list(OsStr::from_bytes(b"/opt/bin\xff:/usr/bin"));
        assert_eq!(
            entries,
            vec![
                PathBuf::from(OsStr::from_bytes(b"/opt/bin\xff")),
                PathBuf::from("/usr/bin"),
            ]
        );
    }
}
