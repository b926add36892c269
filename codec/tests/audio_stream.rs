use bitstream::{unpack_bits, BitWriter};
use codec::{
    decode_audio, encode_audio, quantize_pcm, AudioDecoder, CodecLimits, PcmFormat, Symbol,
    SymbolEncoder, AUDIO_SAMPLE_RATE,
};

const SCENARIO: [i8; 6] = [0, 0, 1, 2, 1, -8];

fn bits(pattern: &str) -> Vec<bool> {
    pattern
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c == '1')
        .collect()
}

fn meaningful_bits(samples: &[i8]) -> usize {
    let mut encoder = SymbolEncoder::with_capacity(samples.len());
    for &sample in samples {
        encoder.push(sample.to_ne_bytes()[0] & 0x0F);
    }
    encoder.bits_written()
}

#[test]
fn scenario_symbols() {
    let symbols: Vec<Symbol> = SCENARIO
        .iter()
        .scan(0u8, |previous, &sample| {
            let current = sample.to_ne_bytes()[0] & 0x0F;
            let symbol = Symbol::classify(*previous, current);
            *previous = current;
            Some(symbol)
        })
        .collect();
    assert_eq!(
        symbols,
        [
            Symbol::Repeat,
            Symbol::Repeat,
            Symbol::Increment,
            Symbol::Increment,
            Symbol::Decrement,
            Symbol::Literal(0b1000),
        ]
    );
}

#[test]
fn scenario_bitstream() {
    let payload = encode_audio(&SCENARIO).unwrap();
    assert_eq!(payload.len(), 2);
    assert_eq!(unpack_bits(&payload), bits("0 0 10 10 110 1111000"));
    assert_eq!(payload, [0b1101_0100, 0b0001_1110]);
    assert_eq!(meaningful_bits(&SCENARIO), 16);
}

#[test]
fn scenario_decodes_with_count() {
    let payload = [0b1101_0100, 0b0001_1110];
    let decoded = decode_audio(&payload, 6, &CodecLimits::for_testing()).unwrap();
    assert_eq!(decoded, SCENARIO);
}

#[test]
fn wraparound_seven_to_minus_eight() {
    let payload = encode_audio(&[7, -8]).unwrap();
    // Literal 0111 then increment.
    assert_eq!(unpack_bits(&payload)[..9], bits("1110111 10")[..]);
    let mut decoder = AudioDecoder::new(&payload);
    assert_eq!(decoder.next_sample().unwrap(), 7);
    assert_eq!(decoder.next_sample().unwrap(), -8);
}

#[test]
fn wraparound_minus_eight_to_seven() {
    let payload = encode_audio(&[-8, 7]).unwrap();
    assert_eq!(unpack_bits(&payload)[..10], bits("1111000 110")[..]);
    let decoded = decode_audio(&payload, 2, &CodecLimits::for_testing()).unwrap();
    assert_eq!(decoded, [-8, 7]);
}

#[test]
fn padding_does_not_change_output() {
    let samples = [3, 3, 4, -2, -3, -3, 7, -8, 0];
    let payload = encode_audio(&samples).unwrap();
    let meaningful = meaningful_bits(&samples);
    let stream = &unpack_bits(&payload)[..meaningful];

    for extra in 1..=7 {
        let mut writer = BitWriter::new();
        writer.extend_bits(stream.iter().copied());
        writer.extend_bits(std::iter::repeat(false).take(extra));
        let padded = writer.finish();
        let decoded = decode_audio(&padded, samples.len(), &CodecLimits::for_testing()).unwrap();
        assert_eq!(decoded, samples, "with {extra} extra zero bits");
    }
}

#[test]
fn quantized_pcm_feeds_encoder() {
    let format = PcmFormat::new(AUDIO_SAMPLE_RATE, 2, 16);
    let pcm: Vec<u8> = [[0i16, 0], [4096, 4096], [32_767, 32_767], [-32_768, -32_768]]
        .iter()
        .flat_map(|frame| frame.iter().flat_map(|s| s.to_le_bytes()))
        .collect();
    let samples = quantize_pcm(&pcm, &format).unwrap();
    assert_eq!(samples, [0, 1, 7, -8]);

    let payload = encode_audio(&samples).unwrap();
    let decoded = decode_audio(&payload, samples.len(), &CodecLimits::for_testing()).unwrap();
    assert_eq!(decoded, samples);
}
