use bitstream::{unpack_bits, BitReader, BitWriter};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Bit(bool),
    Bits { bits: usize, value: u64 },
}

fn mask_value(bits: usize, value: u64) -> u64 {
    if bits >= 64 {
        value
    } else {
        let mask = (1u64 << bits) - 1;
        value & mask
    }
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<bool>().prop_map(Op::Bit),
        (1usize..=64, any::<u64>()).prop_map(|(bits, value)| Op::Bits {
            bits,
            value: mask_value(bits, value),
        }),
    ]
}

proptest! {
    #[test]
    fn prop_roundtrip_ops(ops in prop::collection::vec(op_strategy(), 1..64)) {
        let mut writer = BitWriter::new();

        for op in &ops {
            match op {
                Op::Bit(b) => writer.write_bit(*b),
                Op::Bits { bits, value } => writer.write_bits(*value, *bits).unwrap(),
            }
        }

        let written = writer.bits_written();
        let bytes = writer.finish();
        prop_assert_eq!(bytes.len(), written.div_ceil(8));

        let mut reader = BitReader::new(&bytes);
        for op in &ops {
            match op {
                Op::Bit(b) => prop_assert_eq!(reader.read_bit().unwrap(), *b),
                Op::Bits { bits, value } => prop_assert_eq!(reader.read_bits(*bits).unwrap(), *value),
            }
        }
        prop_assert!(reader.bits_remaining() < 8);
        prop_assert!(reader.remaining_bits_are_zero());
    }

    #[test]
    fn prop_unpack_inverts_pack(bits in prop::collection::vec(any::<bool>(), 0..256)) {
        let mut writer = BitWriter::with_capacity_bits(bits.len());
        writer.extend_bits(bits.iter().copied());
        let bytes = writer.finish();

        let unpacked = unpack_bits(&bytes);
        prop_assert_eq!(unpacked.len() % 8, 0);
        prop_assert_eq!(&unpacked[..bits.len()], &bits[..]);
        prop_assert!(unpacked[bits.len()..].iter().all(|&bit| !bit));
    }
}
