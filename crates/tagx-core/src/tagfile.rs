//! Tag listings: one `tag: count` line per tag, no header.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{Result, TagError};
use crate::frequency::{SortOrder, TagFrequency};
use crate::text::for_each_line;

const SEPARATOR: &str = ": ";

/// Write `tags` to `writer` in `order`, then flush.
pub fn write_tags<W: Write>(writer: W, tags: &TagFrequency, order: SortOrder) -> Result<()> {
    write_listing(writer, tags, order).map_err(|e| TagError::write("output", e))
}

fn write_listing<W: Write>(writer: W, tags: &TagFrequency, order: SortOrder) -> io::Result<()> {
    let mut w = BufWriter::new(writer);
    for (tag, count) in tags.entries(order) {
        writeln!(w, "{tag}{SEPARATOR}{count}")?;
    }
    // BufWriter drops flush errors; flush here so they reach the caller.
    w.flush()
}

/// Save `tags` to `path`.
///
/// An existing destination is replaced through a temp file in its directory,
/// renamed over it only after a successful write, so a failed save leaves the
/// old listing intact. Symlinks are followed and the old file's permissions
/// are kept. When that directory is not writable the listing is written in
/// place instead. A new destination is created directly and removed again if
/// the write fails.
pub fn save_tags(path: &Path, tags: &TagFrequency, order: SortOrder) -> Result<()> {
    let to_err = |e: io::Error| TagError::write(path.display().to_string(), e);
    match fs::metadata(path) {
        Ok(meta) => {
            let target = fs::canonicalize(path).map_err(to_err)?;
            replace_existing(&target, meta.permissions(), tags, order).map_err(to_err)?;
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            create_new(path, tags, order).map_err(to_err)?;
        }
        Err(e) => return Err(to_err(e)),
    }
    tracing::debug!(path = %path.display(), entries = tags.len(), "saved tags");
    Ok(())
}

fn replace_existing(
    target: &Path,
    perms: fs::Permissions,
    tags: &TagFrequency,
    order: SortOrder,
) -> io::Result<()> {
    let dir = target.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = match tempfile::Builder::new()
        .prefix(".tagx-")
        .suffix(".tmp")
        .tempfile_in(dir)
    {
        Ok(tmp) => tmp,
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            tracing::debug!(dir = %dir.display(), "directory not writable, saving in place");
            return write_listing(File::create(target)?, tags, order);
        }
        Err(e) => return Err(e),
    };
    write_listing(tmp.as_file_mut(), tags, order)?;
    tmp.as_file().set_permissions(perms)?;
    tmp.persist(target).map_err(|e| e.error)?;
    Ok(())
}

fn create_new(path: &Path, tags: &TagFrequency, order: SortOrder) -> io::Result<()> {
    let file = File::create(path)?;
    write_listing(file, tags, order).map_err(|e| {
        // Do not leave a partial listing behind.
        let _ = fs::remove_file(path);
        e
    })
}

/// Parse one listing line. Blank lines are skipped.
fn parse_line(line: &str, tags: &mut TagFrequency) -> io::Result<()> {
    if line.trim().is_empty() {
        return Ok(());
    }
    let invalid = |msg: String| io::Error::new(io::ErrorKind::InvalidData, msg);
    let (tag, count) = line
        .rsplit_once(SEPARATOR)
        .ok_or_else(|| invalid(format!("missing \"{SEPARATOR}\" in line {line:?}")))?;
    let count: u64 = count
        .trim()
        .parse()
        .map_err(|e| invalid(format!("bad count in line {line:?}: {e}")))?;
    tags.insert(tag.to_owned(), count);
    Ok(())
}

/// Read a listing written by [`write_tags`] back into a table.
/// Malformed lines fail with [`io::ErrorKind::InvalidData`].
pub fn read_tags<R: BufRead>(reader: R) -> Result<TagFrequency> {
    let mut tags = TagFrequency::new();
    for_each_line(reader, "listing", |line| parse_line(line, &mut tags))?;
    Ok(tags)
}

pub fn read_tags_path(path: &Path) -> Result<TagFrequency> {
    let file = File::open(path).map_err(|e| TagError::read(path.display().to_string(), e))?;
    read_tags(BufReader::new(file)).map_err(|e| e.at_path(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IoAction;

    fn sample() -> TagFrequency {
        [("quick", 1), ("fox", 2), ("jumps", 1)].into_iter().collect()
    }

    fn render(tags: &TagFrequency, order: SortOrder) -> String {
        let mut out = Vec::new();
        write_tags(&mut out, tags, order).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn alphabetical_listing() {
        assert_eq!(
            render(&sample(), SortOrder::Alphabetical),
            "fox: 2\njumps: 1\nquick: 1\n"
        );
    }

    #[test]
    fn frequency_listing() {
        assert_eq!(
            render(&sample(), SortOrder::Frequency),
            "fox: 2\njumps: 1\nquick: 1\n"
        );
        let tags: TagFrequency = [("a", 1), ("b", 3)].into_iter().collect();
        assert_eq!(render(&tags, SortOrder::Frequency), "b: 3\na: 1\n");
    }

    #[test]
    fn empty_table_writes_nothing() {
        assert_eq!(render(&TagFrequency::new(), SortOrder::Alphabetical), "");
    }

    #[test]
    fn listing_reads_back() {
        let text = render(&sample(), SortOrder::Frequency);
        let parsed = read_tags(text.as_bytes()).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn malformed_line_is_invalid_data() {
        let err = read_tags(&b"fox: 2\nnot a listing\n"[..]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        let err = read_tags(&b"fox: two\n"[..]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn sink_failure_is_write_error() {
        let err = write_tags(FailingWriter, &sample(), SortOrder::Alphabetical).unwrap_err();
        assert_eq!(err.action(), IoAction::Write);
    }

    #[test]
    fn save_then_read_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tags.txt");
        save_tags(&path, &sample(), SortOrder::Alphabetical).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "fox: 2\njumps: 1\nquick: 1\n"
        );
        assert_eq!(read_tags_path(&path).unwrap(), sample());
    }

    #[test]
    fn save_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tags.txt");
        std::fs::write(&path, "old: 9\nstale: 1\n").unwrap();
        let tags: TagFrequency = [("new", 1)].into_iter().collect();
        save_tags(&path, &tags, SortOrder::Alphabetical).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new: 1\n");
    }

    #[test]
    fn save_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("tags.txt");
        let err = save_tags(&path, &sample(), SortOrder::Alphabetical).unwrap_err();
        assert_eq!(err.action(), IoAction::Write);
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn save_keeps_permissions_of_existing_file() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tags.txt");
        std::fs::write(&path, "old: 1\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();
        save_tags(&path, &sample(), SortOrder::Alphabetical).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
        assert_eq!(read_tags_path(&path).unwrap(), sample());
    }

    #[cfg(unix)]
    #[test]
    fn new_file_gets_default_permissions() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let reference = dir.path().join("reference.txt");
        File::create(&reference).unwrap();
        let path = dir.path().join("tags.txt");
        save_tags(&path, &sample(), SortOrder::Alphabetical).unwrap();
        let mode = |p: &Path| std::fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&path), mode(&reference));
    }

    #[cfg(unix)]
    #[test]
    fn save_through_symlink_writes_target() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("real.txt");
        let link = dir.path().join("link.txt");
        std::fs::write(&real, "old: 1\n").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();
        save_tags(&link, &sample(), SortOrder::Alphabetical).unwrap();
        assert!(std::fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(
            std::fs::read_to_string(&real).unwrap(),
            "fox: 2\njumps: 1\nquick: 1\n"
        );
    }

    #[test]
    fn save_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tags.txt");
        save_tags(&path, &sample(), SortOrder::Alphabetical).unwrap();
        save_tags(&path, &sample(), SortOrder::Frequency).unwrap();
        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("tags.txt")]);
    }
}
