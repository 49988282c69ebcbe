/// CRC-16/XMODEM, used by the user-friendly address checksum
pub fn crc_16(data: &[u8]) -> u16 {
    const POLY: u16 = 0x1021;

    let mut crc: u16 = 0;
    for &byte in data {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ POLY
            } else {
                crc << 1
            };
        }
    }
    crc
}
