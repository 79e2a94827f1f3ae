use bondlens_buffers::{BufferError, Reader};

#[test]
fn reader_little_endian_matrix() {
    let data = [
        0x2a, // u8
        0xd6, // i8 (-42)
        0x34, 0x12, // u16_le
        0x00, 0x00, 0x80, 0x3f, // f32_le 1.0
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xf0, 0xbf, // f64_le -1.0
    ];
    let mut reader = Reader::new(&data);
    assert_eq!(reader.u8(), Ok(42));
    assert_eq!(reader.i8(), Ok(-42));
    assert_eq!(reader.u16_le(), Ok(0x1234));
    assert_eq!(reader.f32_le(), Ok(1.0));
    assert_eq!(reader.f64_le(), Ok(-1.0));
    assert_eq!(reader.size(), 0);
}

#[test]
fn reader_overrun_matrix() {
    // Every multi-byte read fails cleanly when fewer bytes remain.
    let data = [0x01];
    assert_eq!(Reader::new(&data).u16_le(), Err(BufferError::EndOfBuffer));
    assert_eq!(Reader::new(&data).f32_le(), Err(BufferError::EndOfBuffer));
    assert_eq!(Reader::new(&data).f64_le(), Err(BufferError::EndOfBuffer));
    assert_eq!(Reader::new(&data).buf(2), Err(BufferError::EndOfBuffer));
    assert_eq!(Reader::new(&[]).u8(), Err(BufferError::EndOfBuffer));
}

#[test]
fn reader_cursor_is_not_advanced_by_failed_reads() {
    let data = [0x07, 0x08];
    let mut reader = Reader::new(&data);
    assert!(reader.f64_le().is_err());
    assert_eq!(reader.u8(), Ok(0x07));
    assert!(reader.u16_le().is_err());
    assert_eq!(reader.u8(), Ok(0x08));
}
