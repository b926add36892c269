#![no_main]

use bitstream::BitReader;
use codec::SymbolDecoder;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut reader = BitReader::new(data);
    let mut idx = 0usize;

    // Use input bytes to drive a bounded sequence of operations.
    while idx < data.len() && idx < 1024 {
        let op = data[idx] % 4;
        idx += 1;

        match op {
            0 => {
                let _ = reader.read_bit();
            }
            1 => {
                let bits = usize::from(data[idx - 1] % 72);
                let _ = reader.read_bits(bits);
            }
            2 => {
                let before = reader.bits_remaining();
                let _ = reader.remaining_bits_are_zero();
                assert_eq!(before, reader.bits_remaining());
            }
            _ => {
                assert_eq!(reader.is_empty(), reader.bits_remaining() == 0);
            }
        }
    }

    let mut symbols = SymbolDecoder::new(data);
    let mut previous = 0u8;
    while let Ok(register) = symbols.next_register(previous) {
        assert!(register <= 0x0F);
        previous = register;
    }
});
