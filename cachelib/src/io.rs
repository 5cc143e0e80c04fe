use std::fs::File;
use std::io::BufRead;

/// Wraps an opened trace file in the fastest sequential reader available on this platform
pub fn get_reader(file: File) -> std::io::Result<impl BufRead> {
    // Compatibility on other systems
    #[cfg(not(unix))]
    {
        use std::io::BufReader;
        // 4096 is the standard block size (or a multiple of it) on most systems
        const BUFFER_SIZE: usize = 40 * 4096;
        Ok(BufReader::with_capacity(BUFFER_SIZE, file))
    }
    // Memory map the file for speed on unix systems
    #[cfg(unix)]
    {
        use std::io::Cursor;
        use memmap2::{Advice, Mmap};
        // Safety: the mapping is only read, and trace files aren't modified while being simulated
        let m = unsafe { Mmap::map(&file)? };
        m.advise(Advice::Sequential)?;
        Ok(Cursor::new(m))
    }
}
