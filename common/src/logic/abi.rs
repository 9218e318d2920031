use deploy_defs::{Address, Artifact};
use deploy_utils::pad_word;

/// ABI-encodes constructor arguments. Only static address arguments occur,
/// so each one is a single left-padded word.
pub fn encode_constructor_args(args: &[Address]) -> String {
    args.iter().map(|arg| pad_word(arg.hex_digits())).collect()
}

/// Transaction data that creates `artifact` with `args`.
pub fn creation_data(artifact: &Artifact, args: &[Address]) -> String {
    format!(
        "0x{}{}",
        artifact.bytecode_hex(),
        encode_constructor_args(args)
    )
}
