//! Seven-field kind/domain/country classification records.

use crate::core::cursor::{DisReader, DisWriter};
use crate::core::record::Record;
use crate::error::Result;
use serde::{Deserialize, Serialize};

macro_rules! kind_record {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        pub struct $name {
            pub kind: u8,
            pub domain: u8,
            pub country: u16,
            pub category: u8,
            pub subcategory: u8,
            pub specific: u8,
            pub extra: u8,
        }

        impl $name {
            pub const LENGTH: usize = 8;

            pub const fn new(
                kind: u8,
                domain: u8,
                country: u16,
                category: u8,
                subcategory: u8,
                specific: u8,
                extra: u8,
            ) -> Self {
                Self {
                    kind,
                    domain,
                    country,
                    category,
                    subcategory,
                    specific,
                    extra,
                }
            }
        }

        impl Record for $name {
            fn read(r: &mut DisReader<'_>) -> Result<Self> {
                Ok(Self {
                    kind: r.read_u8()?,
                    domain: r.read_u8()?,
                    country: r.read_u16()?,
                    category: r.read_u8()?,
                    subcategory: r.read_u8()?,
                    specific: r.read_u8()?,
                    extra: r.read_u8()?,
                })
            }

            fn write(&self, w: &mut DisWriter<'_>) {
                w.write_u8(self.kind);
                w.write_u8(self.domain);
                w.write_u16(self.country);
                w.write_u8(self.category);
                w.write_u8(self.subcategory);
                w.write_u8(self.specific);
                w.write_u8(self.extra);
            }

            fn length(&self) -> usize {
                Self::LENGTH
            }
        }
    };
}

kind_record!(
    /// Entity type (also used for munition types)
    EntityType
);

kind_record!(
    /// Aggregate type. Same layout as [`EntityType`], where `kind` is the aggregate kind.
    AggregateType
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cursor::ByteOrder;
    use bytes::BytesMut;

    #[test]
    fn test_aggregate_type_layout() {
        let t = AggregateType::new(1, 2, 225, 3, 4, 5, 6);
        let mut buf = BytesMut::new();
        t.write(&mut DisWriter::new(&mut buf, ByteOrder::BigEndian));
        assert_eq!(&buf[..], &[1u8, 2, 0, 225, 3, 4, 5, 6]);
        assert_eq!(
            AggregateType::read(&mut DisReader::new(&buf, ByteOrder::BigEndian)).unwrap(),
            t
        );
    }
}
