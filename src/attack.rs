//! Birthday search for two inputs that agree on every min-cut edge.
//!
//! The values crossing the minimum cut determine every output, so a collision on the
//! cut is a collision of the whole circuit; its width is usually far smaller than the
//! output width.

use std::collections::HashMap;

use bitvec::vec::BitVec;
use log::{debug, info, warn};
use rand::Rng;

use crate::{bits::bits_to_string, Circuit, CircuitError, GateId, GateValue, HashFunction};

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("Circuit error: {0}")]
    Circuit(#[from] CircuitError),
    #[error("{count} free inputs is too many to enumerate (max {max})")]
    TooManyFreeInputs { count: usize, max: usize },
    #[error("Gate {0} is not an input of the circuit")]
    NotAnInput(GateId),
}
pub type AttackError = Error;

/// Where candidate inputs come from.
///
/// Implementations must agree with every fixed input of the circuit.
pub trait InputSource {
    fn sample<R: Rng + ?Sized>(
        &self,
        circuit: &Circuit,
        rng: &mut R,
    ) -> Result<Vec<bool>, CircuitError>;
}

/// Uniformly random bits for every non-fixed input
#[derive(Clone, Copy, Debug, Default)]
pub struct UniformInputs;

impl InputSource for UniformInputs {
    fn sample<R: Rng + ?Sized>(
        &self,
        circuit: &Circuit,
        rng: &mut R,
    ) -> Result<Vec<bool>, CircuitError> {
        let mut input = Vec::new();
        for id in circuit.inputs() {
            input.push(match circuit.gate_value(id)? {
                GateValue::Fixed(v) => v,
                _ => rng.random(),
            });
        }
        Ok(input)
    }
}

/// Validly padded random messages of random length, with fixed inputs taking precedence
impl InputSource for HashFunction {
    fn sample<R: Rng + ?Sized>(
        &self,
        circuit: &Circuit,
        rng: &mut R,
    ) -> Result<Vec<bool>, CircuitError> {
        let mut input = self.random_input(rng)?;
        let inputs = circuit.inputs();
        if inputs.len() != input.len() {
            return Err(CircuitError::InputLength {
                expected: inputs.len(),
                actual: input.len(),
            });
        }

        for (bit, id) in input.iter_mut().zip(inputs) {
            if let GateValue::Fixed(v) = circuit.gate_value(id)? {
                *bit = v;
            }
        }
        Ok(input)
    }
}

#[derive(Clone, Debug)]
pub struct AttackConfig {
    /// Candidates per batch; derived from the cut width when `None`
    pub batch_size: Option<usize>,
    /// Give up after this many batches; `None` searches until a collision
    pub max_batches: Option<usize>,
    /// Upper bound for the derived batch size, as a power of two
    pub max_batch_log2: u32,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            batch_size: None,
            max_batches: None,
            max_batch_log2: 16,
        }
    }
}

impl AttackConfig {
    /// `2^ceil(width / 2)`, clamped to `[2, 2^max_batch_log2]`
    pub fn batch_size_for(&self, digest_width: usize) -> usize {
        if let Some(size) = self.batch_size {
            return size.max(1);
        }
        let log2 = digest_width.div_ceil(2).min(self.max_batch_log2 as usize);
        (1usize << log2).max(2)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Collision {
    pub first: Vec<bool>,
    pub second: Vec<bool>,
    /// Shared min-cut values
    pub digest: Vec<bool>,
    pub first_output: Vec<bool>,
    pub second_output: Vec<bool>,
    pub batches: usize,
    pub samples: usize,
}

impl Collision {
    /// The two colliding inputs as `'0'`/`'1'` strings
    pub fn messages(&self) -> (String, String) {
        (bits_to_string(&self.first), bits_to_string(&self.second))
    }

    pub fn outputs_match(&self) -> bool {
        self.first_output == self.second_output
    }
}

/// Repeats per table entry after which a full digest table ends the search
pub const FULL_TABLE_REPEATS: usize = 16;

/// Sample inputs until two distinct ones share their min-cut values.
///
/// The digest table is kept across batches. Returns `Ok(None)` when
/// [`AttackConfig::max_batches`] runs out, or when the table holds every possible digest
/// and [`FULL_TABLE_REPEATS`] times as many further samples only repeated stored inputs.
pub fn run_birthday_attack<S, R>(
    circuit: &mut Circuit,
    source: &S,
    config: &AttackConfig,
    rng: &mut R,
) -> Result<Option<Collision>, Error>
where
    S: InputSource,
    R: Rng + ?Sized,
{
    let width = circuit.min_cut()?.len();
    let batch_size = config.batch_size_for(width);
    debug!("birthday: cut_width={width} batch_size={batch_size}");

    let mut table: HashMap<BitVec, BitVec> = HashMap::new();
    let digest_space = (width < usize::BITS as usize).then(|| 1usize << width);
    let stale_limit = digest_space.map(|n| n.saturating_mul(FULL_TABLE_REPEATS));
    let mut batches = 0;
    let mut samples = 0;
    // samples that only repeated a stored input while the table was full
    let mut stale = 0usize;

    loop {
        if config.max_batches.is_some_and(|max| batches >= max) {
            warn!("birthday: no collision after batches={batches} samples={samples}");
            return Ok(None);
        }
        batches += 1;

        for _ in 0..batch_size {
            let input = source.sample(circuit, rng)?;
            let digest = circuit.min_cut_values_for(&input)?;
            samples += 1;

            let key: BitVec = digest.iter().copied().collect();
            let packed: BitVec = input.iter().copied().collect();
            match table.get(&key) {
                Some(previous) if *previous != packed => {
                    let first: Vec<bool> = previous.iter().by_vals().collect();
                    let first_output = circuit.get_output_for(&first)?;
                    let second_output = circuit.get_output_for(&input)?;

                    info!(
                        "birthday: collision after batches={batches} samples={samples} cut_width={width}"
                    );
                    return Ok(Some(Collision {
                        first,
                        second: input,
                        digest,
                        first_output,
                        second_output,
                        batches,
                        samples,
                    }));
                }
                Some(_) => {
                    if digest_space == Some(table.len()) {
                        stale += 1;
                    }
                }
                None => {
                    table.insert(key, packed);
                }
            }
        }

        debug!("birthday: batch={batches} table={}", table.len());

        if stale_limit.is_some_and(|limit| stale >= limit) {
            warn!("birthday: all 2^{width} digests taken, no collision with the fixed inputs");
            return Ok(None);
        }
    }
}

/// Largest number of free inputs [`free_input_variants`] will enumerate
pub const MAX_FREE_INPUTS: usize = 20;

/// Every assignment of the `free` inputs, all other inputs taken from `base`.
///
/// After [`Circuit::simplify`] all of them give the same output.
pub fn free_input_variants(
    circuit: &Circuit,
    base: &[bool],
    free: &[GateId],
) -> Result<Vec<Vec<bool>>, Error> {
    let inputs = circuit.inputs();
    if inputs.len() != base.len() {
        return Err(CircuitError::InputLength {
            expected: inputs.len(),
            actual: base.len(),
        }
        .into());
    }
    if free.len() > MAX_FREE_INPUTS {
        return Err(Error::TooManyFreeInputs {
            count: free.len(),
            max: MAX_FREE_INPUTS,
        });
    }

    let positions = free
        .iter()
        .map(|id| inputs.binary_search(id).map_err(|_| Error::NotAnInput(*id)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok((0..1usize << positions.len())
        .map(|mask| {
            let mut input = base.to_vec();
            for (bit, pos) in positions.iter().enumerate() {
                input[*pos] = mask >> bit & 1 == 1;
            }
            input
        })
        .collect())
}
