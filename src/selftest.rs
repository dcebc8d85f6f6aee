//! Known-answer checks run at startup by the `sha256` binary.

use std::fmt;

use crate::error::Error;
use crate::sha256::{digest, Digest};

/// A literal input together with its published digest.
#[derive(Clone, Copy, Debug)]
pub struct KnownAnswer {
    pub input: &'static str,
    pub expected: [u8; crate::DIGEST_LEN],
}

pub const KNOWN_ANSWERS: [KnownAnswer; 3] = [
    KnownAnswer {
        input: "",
        expected: [
            0xe3, 0xb0, 0xc4, 0x42, 0x98, 0xfc, 0x1c, 0x14, 0x9a, 0xfb, 0xf4, 0xc8, 0x99, 0x6f,
            0xb9, 0x24, 0x27, 0xae, 0x41, 0xe4, 0x64, 0x9b, 0x93, 0x4c, 0xa4, 0x95, 0x99, 0x1b,
            0x78, 0x52, 0xb8, 0x55,
        ],
    },
    KnownAnswer {
        input: "The Times 03/Jan/2009 Chancellor on brink of second bailout for banks",
        expected: [
            0xa6, 0xd7, 0x2b, 0xaa, 0x3d, 0xb9, 0x00, 0xb0, 0x3e, 0x70, 0xdf, 0x88, 0x0e, 0x50,
            0x3e, 0x91, 0x64, 0x01, 0x3b, 0x4d, 0x9a, 0x47, 0x08, 0x53, 0xed, 0xc1, 0x15, 0x77,
            0x63, 0x23, 0xa0, 0x98,
        ],
    },
    KnownAnswer {
        input: "It ain't what you don't know that gets you into trouble. \
                It's what you know for sure that just ain't so.",
        expected: [
            0xa0, 0x98, 0x23, 0xe3, 0x8e, 0x8b, 0x7a, 0xfa, 0xe3, 0x85, 0xb5, 0xe5, 0x64, 0xb3,
            0x00, 0x99, 0xf4, 0x53, 0xd3, 0x24, 0x2a, 0x2a, 0x31, 0x74, 0x5f, 0xb2, 0xf1, 0x63,
            0xaa, 0x31, 0x91, 0xf9,
        ],
    },
];

/// Result of checking one known answer.
#[derive(Clone, Debug)]
pub struct Outcome {
    pub input: &'static str,
    pub expected: Digest,
    pub computed: Digest,
}

impl Outcome {
    pub fn passed(&self) -> bool {
        self.expected == self.computed
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "input:            \"{}\"", self.input)?;
        writeln!(f, "target digest:    {}", self.expected)?;
        writeln!(f, "computed digest:  {}", self.computed)?;
        let status = if self.passed() { "PASS" } else { "FAIL" };
        writeln!(f, "status:           {}", status)?;
        writeln!(f)?;
        writeln!(f)
    }
}

/// Hashes every entry of `answers` and reports how each one compares.
pub fn check(answers: &[KnownAnswer]) -> Result<Vec<Outcome>, Error> {
    answers
        .iter()
        .map(|answer| {
            Ok(Outcome {
                input: answer.input,
                expected: Digest(answer.expected),
                computed: digest(answer.input.as_bytes())?,
            })
        })
        .collect()
}

/// Runs the built-in [`KNOWN_ANSWERS`].
pub fn run() -> Result<Vec<Outcome>, Error> {
    check(&KNOWN_ANSWERS)
}
