//! Delta-decoded class members.
//!
//! A `class_data_item` opens with four uleb128 counts (static fields, instance fields,
//! direct methods, virtual methods) followed by the member lists. Each member stores its
//! index as a uleb128 delta against the previous entry - the first entry's delta is the
//! absolute index - plus its access flags, and for methods the offset of its code item.
//!
//! [`ClassAccessor`] parses the counts once; [`ClassAccessor::get_fields`] and
//! [`ClassAccessor::get_methods`] hand out lazy iterators that decode one entry per
//! `next()`. Decode damage (bad varints, truncation, index overflow) surfaces as an
//! `Err` item, after which the iterator fuses. The iterators are restartable: every
//! call to the getters walks the member lists from the start.

use crate::{codec::decode_uleb128, dex::MethodKind, Result};

/// Lazily decoded view of one class's `class_data_item`.
///
/// # Examples
///
/// ```rust,no_run
/// use dexscope::{File, dex::{DexFile, VerificationPreset}};
///
/// let file = File::from_file("classes.dex".as_ref())?;
/// let dex = DexFile::open(&file, VerificationPreset::Basic)?;
/// let class_def = dex.get_class_def(0)?;
///
/// if let Some(accessor) = dex.get_class_accessor(&class_def)? {
///     println!("{} methods", accessor.num_methods());
///     for method in accessor.get_methods() {
///         let method = method?;
///         println!("method_idx {}", method.method_idx);
///     }
/// }
/// # Ok::<(), dexscope::Error>(())
/// ```
pub struct ClassAccessor<'a> {
    /// Class data starting at the first member entry, counts already consumed.
    members: &'a [u8],
    num_static_fields: u32,
    num_instance_fields: u32,
    num_direct_methods: u32,
    num_virtual_methods: u32,
}

impl<'a> ClassAccessor<'a> {
    /// Parses the four member counts from the start of a `class_data_item`.
    ///
    /// # Errors
    ///
    /// Fails if any count is a bad or truncated varint, or if the field or method
    /// counts sum past `u32::MAX`.
    pub(crate) fn from_raw(class_data: &'a [u8]) -> Result<ClassAccessor<'a>> {
        let mut pos = 0;
        let num_static_fields = decode_uleb128(class_data, &mut pos)?;
        let num_instance_fields = decode_uleb128(class_data, &mut pos)?;
        let num_direct_methods = decode_uleb128(class_data, &mut pos)?;
        let num_virtual_methods = decode_uleb128(class_data, &mut pos)?;

        // the summed counts drive list skipping, so they must stay representable
        if num_static_fields.checked_add(num_instance_fields).is_none()
            || num_direct_methods.checked_add(num_virtual_methods).is_none()
        {
            return Err(malformed_error!(
                "Class data member counts overflow ({} + {} fields, {} + {} methods)",
                num_static_fields,
                num_instance_fields,
                num_direct_methods,
                num_virtual_methods
            ));
        }

        Ok(ClassAccessor {
            members: &class_data[pos..],
            num_static_fields,
            num_instance_fields,
            num_direct_methods,
            num_virtual_methods,
        })
    }

    /// Number of static fields.
    #[must_use]
    pub fn num_static_fields(&self) -> u32 {
        self.num_static_fields
    }

    /// Number of instance fields.
    #[must_use]
    pub fn num_instance_fields(&self) -> u32 {
        self.num_instance_fields
    }

    /// Number of direct (statically dispatched) methods.
    #[must_use]
    pub fn num_direct_methods(&self) -> u32 {
        self.num_direct_methods
    }

    /// Number of virtually dispatched methods.
    #[must_use]
    pub fn num_virtual_methods(&self) -> u32 {
        self.num_virtual_methods
    }

    /// Total number of declared fields.
    #[must_use]
    pub fn num_fields(&self) -> u32 {
        self.num_static_fields + self.num_instance_fields
    }

    /// Total number of declared methods.
    #[must_use]
    pub fn num_methods(&self) -> u32 {
        self.num_direct_methods + self.num_virtual_methods
    }

    /// Iterates the declared fields, static first, then instance.
    #[must_use]
    pub fn get_fields(&self) -> FieldIterator<'a> {
        FieldIterator {
            data: self.members,
            pos: 0,
            remaining_static: self.num_static_fields,
            remaining_instance: self.num_instance_fields,
            index: 0,
            in_instance: false,
            failed: false,
        }
    }

    /// Iterates the declared methods, direct first, then virtual.
    ///
    /// The field entries preceding the method lists are skipped lazily on the first
    /// `next()` call.
    #[must_use]
    pub fn get_methods(&self) -> MethodIterator<'a> {
        MethodIterator {
            data: self.members,
            pos: 0,
            fields_to_skip: self.num_fields(),
            remaining_direct: self.num_direct_methods,
            remaining_virtual: self.num_virtual_methods,
            index: 0,
            direct_started: false,
            in_virtual: false,
            failed: false,
        }
    }
}

/// One field entry of a class, with its index delta already resolved.
#[derive(Debug, Clone)]
pub struct EncodedField {
    /// Absolute index into the field identifiers table.
    pub field_idx: u32,
    /// Raw access flags; see [`crate::dex::AccessFlags`].
    pub access_flags: u32,
    /// Whether this entry came from the static field list.
    pub is_static: bool,
}

/// One method entry of a class, with its index delta already resolved.
#[derive(Debug, Clone)]
pub struct EncodedMethod {
    /// Absolute index into the method identifiers table.
    pub method_idx: u32,
    /// Raw access flags; see [`crate::dex::AccessFlags`].
    pub access_flags: u32,
    /// Offset of the method's code item, or 0 for abstract and native methods.
    pub code_off: u32,
    /// Whether this entry came from the direct method list.
    pub is_direct: bool,
}

impl EncodedMethod {
    /// Whether this method has a body.
    #[must_use]
    pub fn has_code(&self) -> bool {
        self.code_off != 0
    }

    /// Classifies how this method is dispatched.
    ///
    /// Takes the class access flags because interface membership is a property of the
    /// defining class, not of the method entry.
    #[must_use]
    pub fn kind(&self, class_access_flags: crate::dex::AccessFlags) -> MethodKind {
        if self.access_flags & crate::dex::AccessFlags::STATIC.bits() != 0 {
            MethodKind::Static
        } else if self.is_direct {
            MethodKind::Direct
        } else if class_access_flags.contains(crate::dex::AccessFlags::INTERFACE) {
            MethodKind::Interface
        } else {
            MethodKind::Virtual
        }
    }
}

fn accumulate_index(index: u32, delta: u32, first: bool) -> Result<u32> {
    if first {
        return Ok(delta);
    }
    index
        .checked_add(delta)
        .ok_or_else(|| malformed_error!("Encoded member index delta overflows past {}", index))
}

/// Lazy iterator over the field entries of one class.
///
/// Yields `Err` once and then fuses if the encoded data is damaged.
pub struct FieldIterator<'a> {
    data: &'a [u8],
    pos: usize,
    remaining_static: u32,
    remaining_instance: u32,
    index: u32,
    in_instance: bool,
    failed: bool,
}

impl FieldIterator<'_> {
    fn decode_entry(&mut self, is_static: bool, first: bool) -> Result<EncodedField> {
        let delta = decode_uleb128(self.data, &mut self.pos)?;
        let access_flags = decode_uleb128(self.data, &mut self.pos)?;

        self.index = accumulate_index(self.index, delta, first)?;
        Ok(EncodedField {
            field_idx: self.index,
            access_flags,
            is_static,
        })
    }
}

impl Iterator for FieldIterator<'_> {
    type Item = Result<EncodedField>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let (is_static, first) = if self.remaining_static > 0 {
            let first = self.pos == 0;
            self.remaining_static -= 1;
            (true, first)
        } else if self.remaining_instance > 0 {
            // the instance list restarts the delta chain
            let first = !self.in_instance;
            self.remaining_instance -= 1;
            self.in_instance = true;
            (false, first)
        } else {
            return None;
        };

        match self.decode_entry(is_static, first) {
            Ok(field) => Some(Ok(field)),
            Err(error) => {
                self.failed = true;
                Some(Err(error))
            }
        }
    }
}

/// Lazy iterator over the method entries of one class.
///
/// Yields `Err` once and then fuses if the encoded data is damaged.
pub struct MethodIterator<'a> {
    data: &'a [u8],
    pos: usize,
    fields_to_skip: u32,
    remaining_direct: u32,
    remaining_virtual: u32,
    index: u32,
    direct_started: bool,
    in_virtual: bool,
    failed: bool,
}

impl MethodIterator<'_> {
    /// Advances past the field entries that precede the method lists.
    fn skip_fields(&mut self) -> Result<()> {
        while self.fields_to_skip > 0 {
            decode_uleb128(self.data, &mut self.pos)?;
            decode_uleb128(self.data, &mut self.pos)?;
            self.fields_to_skip -= 1;
        }
        Ok(())
    }

    fn decode_entry(&mut self, is_direct: bool, first: bool) -> Result<EncodedMethod> {
        let delta = decode_uleb128(self.data, &mut self.pos)?;
        let access_flags = decode_uleb128(self.data, &mut self.pos)?;
        let code_off = decode_uleb128(self.data, &mut self.pos)?;

        self.index = accumulate_index(self.index, delta, first)?;
        Ok(EncodedMethod {
            method_idx: self.index,
            access_flags,
            code_off,
            is_direct,
        })
    }
}

impl Iterator for MethodIterator<'_> {
    type Item = Result<EncodedMethod>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        if let Err(error) = self.skip_fields() {
            self.failed = true;
            return Some(Err(error));
        }

        let (is_direct, first) = if self.remaining_direct > 0 {
            let first = !self.direct_started;
            self.remaining_direct -= 1;
            self.direct_started = true;
            (true, first)
        } else if self.remaining_virtual > 0 {
            // the virtual list restarts the delta chain
            let first = !self.in_virtual;
            self.remaining_virtual -= 1;
            self.in_virtual = true;
            if first {
                self.index = 0;
            }
            (false, first)
        } else {
            return None;
        };

        match self.decode_entry(is_direct, first) {
            Ok(method) => Some(Ok(method)),
            Err(error) => {
                self.failed = true;
                Some(Err(error))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode_uleb128;

    fn class_data(counts: [u32; 4], entries: &[&[u32]]) -> Vec<u8> {
        let mut out = Vec::new();
        for count in counts {
            out.extend(encode_uleb128(count));
        }
        for entry in entries {
            for value in *entry {
                out.extend(encode_uleb128(*value));
            }
        }
        out
    }

    #[test]
    fn counts() {
        let data = class_data([1, 2, 3, 4], &[]);
        let accessor = ClassAccessor::from_raw(&data).unwrap();

        assert_eq!(accessor.num_static_fields(), 1);
        assert_eq!(accessor.num_instance_fields(), 2);
        assert_eq!(accessor.num_direct_methods(), 3);
        assert_eq!(accessor.num_virtual_methods(), 4);
        assert_eq!(accessor.num_fields(), 3);
        assert_eq!(accessor.num_methods(), 7);
    }

    #[test]
    fn field_deltas_accumulate() {
        // static fields at indices 2 and 7, instance field restarts at 1
        let data = class_data(
            [2, 1, 0, 0],
            &[&[2, 0x0008], &[5, 0x0008], &[1, 0x0001]],
        );
        let accessor = ClassAccessor::from_raw(&data).unwrap();

        let fields: Vec<_> = accessor
            .get_fields()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0].field_idx, 2);
        assert!(fields[0].is_static);
        assert_eq!(fields[1].field_idx, 7);
        assert_eq!(fields[2].field_idx, 1);
        assert!(!fields[2].is_static);
    }

    #[test]
    fn method_deltas_with_field_skip() {
        // one instance field, then direct methods 3 and 5, virtual restarts at 2
        let data = class_data(
            [0, 1, 2, 1],
            &[
                &[9, 0x0002],
                &[3, 0x0002, 0x100],
                &[2, 0x0001, 0],
                &[2, 0x0401, 0],
            ],
        );
        let accessor = ClassAccessor::from_raw(&data).unwrap();

        let methods: Vec<_> = accessor
            .get_methods()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(methods.len(), 3);

        assert_eq!(methods[0].method_idx, 3);
        assert!(methods[0].is_direct);
        assert!(methods[0].has_code());
        assert_eq!(methods[0].code_off, 0x100);

        assert_eq!(methods[1].method_idx, 5);
        assert!(!methods[1].has_code());

        // virtual list starts a fresh delta chain
        assert_eq!(methods[2].method_idx, 2);
        assert!(!methods[2].is_direct);
    }

    #[test]
    fn iterators_are_restartable() {
        let data = class_data([0, 0, 1, 0], &[&[4, 0x0008, 0]]);
        let accessor = ClassAccessor::from_raw(&data).unwrap();

        for _ in 0..2 {
            let methods: Vec<_> = accessor.get_methods().collect::<Result<_>>().unwrap();
            assert_eq!(methods.len(), 1);
            assert_eq!(methods[0].method_idx, 4);
        }
    }

    #[test]
    fn truncated_entry_fuses() {
        // declares one direct method but carries no entry bytes
        let data = class_data([0, 0, 1, 0], &[]);
        let accessor = ClassAccessor::from_raw(&data).unwrap();

        let mut methods = accessor.get_methods();
        assert!(methods.next().unwrap().is_err());
        assert!(methods.next().is_none());
    }

    #[test]
    fn truncated_counts() {
        assert!(ClassAccessor::from_raw(&[0x00, 0x00]).is_err());
    }

    #[test]
    fn overflowing_counts() {
        // field counts summing past u32::MAX must fail at parse time, not wrap
        // during the list walk
        let data = class_data([u32::MAX, 1, 0, 1], &[]);
        assert!(ClassAccessor::from_raw(&data).is_err());

        let data = class_data([0, 0, u32::MAX, 2], &[]);
        assert!(ClassAccessor::from_raw(&data).is_err());

        // the individual maxima are fine as long as the sums fit
        let data = class_data([u32::MAX, 0, 0, u32::MAX], &[]);
        let accessor = ClassAccessor::from_raw(&data).unwrap();
        assert_eq!(accessor.num_fields(), u32::MAX);
        assert_eq!(accessor.num_methods(), u32::MAX);
    }

    #[test]
    fn method_kind() {
        let static_init = EncodedMethod {
            method_idx: 0,
            access_flags: (crate::dex::AccessFlags::STATIC | crate::dex::AccessFlags::CONSTRUCTOR)
                .bits(),
            code_off: 0x100,
            is_direct: true,
        };
        assert_eq!(
            static_init.kind(crate::dex::AccessFlags::PUBLIC),
            crate::dex::MethodKind::Static
        );

        let virtual_method = EncodedMethod {
            method_idx: 1,
            access_flags: crate::dex::AccessFlags::PUBLIC.bits(),
            code_off: 0x100,
            is_direct: false,
        };
        assert_eq!(
            virtual_method.kind(crate::dex::AccessFlags::PUBLIC),
            crate::dex::MethodKind::Virtual
        );
        assert_eq!(
            virtual_method.kind(crate::dex::AccessFlags::INTERFACE),
            crate::dex::MethodKind::Interface
        );
    }
}
