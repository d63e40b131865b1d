use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// This enum covers all possible error conditions that can occur while parsing, verifying and
/// disassembling DEX containers. Each variant provides specific context about the failure mode
/// to enable appropriate error handling.
///
/// # Error Categories
///
/// ## Container Errors
/// - [`Error::Malformed`] - Corrupted or invalid container structure
/// - [`Error::ChecksumMismatch`] - The adler32 header checksum does not match the payload
/// - [`Error::OutOfBounds`] - Attempted to read beyond the container boundaries
/// - [`Error::Truncated`] - A structure declared more bytes than the container holds
/// - [`Error::Empty`] - Empty input provided
/// - [`Error::FileError`] - Filesystem I/O errors
///
/// ## Table Access Errors
/// - [`Error::IndexOutOfBounds`] - An index row lookup past the end of its table
///
/// ## Codec Errors
/// - [`Error::VarintTooLong`] / [`Error::VarintTruncated`] - Invalid LEB128 sequences
/// - [`Error::Mutf8Malformed`] / [`Error::Mutf8MissingTerminator`] - Invalid string data
///
/// ## Bytecode Errors
/// - [`Error::InvalidOpcode`] - An unassigned opcode in an instruction stream
/// - [`Error::InstructionOverrun`] - An instruction wider than its remaining buffer
/// - [`Error::OperandAccess`] - A register operand requested from a format without it
///
/// # Examples
///
/// ```rust
/// use dexscope::{Error, File, dex::{DexFile, VerificationPreset}};
///
/// let file = File::from_mem(vec![0x64, 0x65, 0x78])?;
/// match DexFile::open(&file, VerificationPreset::Basic) {
///     Ok(dex) => println!("version {}", dex.header().version()),
///     Err(Error::Malformed { message, file, line }) => {
///         eprintln!("Malformed container: {} ({}:{})", message, file, line);
///     }
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// # Ok::<(), dexscope::Error>(())
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The container is damaged and could not be parsed.
    ///
    /// This error indicates that the structure is corrupted or doesn't conform to the published
    /// DEX format. The error includes the source location where the malformation was detected
    /// for debugging purposes.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// The adler32 checksum computed over the container payload does not match the header.
    ///
    /// Only raised under [`crate::dex::VerificationPreset::Full`].
    #[error("Bad checksum: {actual:#010x}, expected {expected:#010x}")]
    ChecksumMismatch {
        /// The checksum computed over the container bytes after the first 12
        actual: u32,
        /// The checksum the header declares
        expected: u32,
    },

    /// An out of bound access was attempted while parsing the container.
    ///
    /// This error occurs when trying to read data beyond the end of the container or
    /// buffer. It's a safety check to prevent buffer overruns during parsing.
    #[error("Out of Bound read would have occurred!")]
    OutOfBounds,

    /// A structure declared more bytes at an offset than the container holds.
    ///
    /// Unlike [`Error::OutOfBounds`] this variant carries the offending location,
    /// which makes truncated-file diagnostics actionable.
    #[error("Truncated data: {wanted} bytes at offset {offset} exceed the container")]
    Truncated {
        /// The offset at which the read started
        offset: usize,
        /// The number of bytes the structure declared
        wanted: usize,
    },

    /// Provided input was empty.
    ///
    /// This error occurs when an empty file or buffer is provided where actual
    /// DEX data was expected.
    #[error("Provided input was empty")]
    Empty,

    /// File I/O error.
    ///
    /// Wraps standard I/O errors that can occur during file operations such as
    /// reading from disk, permission issues, or filesystem errors.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// An index row lookup past the end of its table.
    ///
    /// Raised by the strict `get_*` accessors; the `get_*_opt` variants map this
    /// condition to `None` instead.
    #[error("Index {index} into the {table} table should be less than {len}")]
    IndexOutOfBounds {
        /// The requested row index
        index: u32,
        /// The table that was addressed
        table: &'static str,
        /// The number of rows the table holds
        len: usize,
    },

    /// An unsigned LEB128 sequence ran past its maximum of five groups.
    #[error("Varint at offset {offset} exceeds five groups")]
    VarintTooLong {
        /// The offset at which the sequence started
        offset: usize,
    },

    /// The buffer ended in the middle of a LEB128 sequence.
    #[error("Varint at offset {offset} is cut short by the end of the buffer")]
    VarintTruncated {
        /// The offset at which the sequence started
        offset: usize,
    },

    /// A modified-UTF8 byte sequence that no valid encoder produces.
    ///
    /// Covers bad lead/continuation bytes and surrogate halves that cannot pair.
    #[error("Invalid modified-UTF8 sequence at offset {offset}")]
    Mutf8Malformed {
        /// The offset of the offending byte within the string payload
        offset: usize,
    },

    /// String data without the mandatory NUL terminator.
    ///
    /// The lossy decoder raises this as well; tolerance covers encoding damage,
    /// not framing damage.
    #[error("Modified-UTF8 string data does not end with a null byte")]
    Mutf8MissingTerminator,

    /// An opcode the Dalvik bytecode catalog leaves unassigned.
    #[error("Invalid opcode {opcode:#04x} at code unit {offset}")]
    InvalidOpcode {
        /// The raw opcode byte
        opcode: u8,
        /// The code-unit offset within the instruction stream
        offset: usize,
    },

    /// An instruction whose format or payload is wider than the remaining buffer.
    #[error("Instruction '{mnemonic}' at code unit {offset} needs {size} code units past the end of the stream")]
    InstructionOverrun {
        /// The mnemonic of the offending instruction
        mnemonic: &'static str,
        /// The code-unit offset within the instruction stream
        offset: usize,
        /// The instruction width in code units
        size: usize,
    },

    /// A register operand was requested from an instruction format that lacks it.
    #[error("Instruction '{mnemonic}' has no {operand} operand")]
    OperandAccess {
        /// The mnemonic of the instruction
        mnemonic: &'static str,
        /// The operand that was requested
        operand: &'static str,
    },
}
