#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GateType {
    Input = 0,
    Output = 1,
    Not = 2,
    And = 3,
    Or = 4,
    Xor = 5,
    Nand = 6,
    Nor = 7,
    Xnor = 8,
    /// Synthetic source/sink terminal used only by the flow reduction
    Sink = 9,
}

/// What a binary gate reduces to once one of its operands is a known constant
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Folded {
    /// The gate output no longer depends on the other operand
    Constant(bool),
    /// The gate passes the other operand through
    Other,
    /// The gate passes the negation of the other operand through
    NotOther,
}

impl GateType {
    pub const COUNT: usize = 10;

    pub const ALL: [GateType; Self::COUNT] = [
        GateType::Input,
        GateType::Output,
        GateType::Not,
        GateType::And,
        GateType::Or,
        GateType::Xor,
        GateType::Nand,
        GateType::Nor,
        GateType::Xnor,
        GateType::Sink,
    ];

    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Boolean function of the gate; unary gates ignore the second argument
    pub const fn f(&self) -> Option<fn(bool, bool) -> bool> {
        let f: fn(bool, bool) -> bool = match self {
            GateType::Output => |a, _| a,
            GateType::Not => |a, _| !a,

            GateType::And => |a, b| a & b,
            GateType::Nand => |a, b| !(a & b),

            GateType::Or => |a, b| a | b,
            GateType::Nor => |a, b| !(a | b),

            GateType::Xor => |a, b| a ^ b,
            GateType::Xnor => |a, b| !(a ^ b),

            GateType::Input | GateType::Sink => return None,
        };
        Some(f)
    }

    /// Required number of predecessors, `None` for the synthetic terminal
    pub const fn arity(&self) -> Option<usize> {
        match self {
            GateType::Input => Some(0),
            GateType::Output | GateType::Not => Some(1),
            GateType::And
            | GateType::Or
            | GateType::Xor
            | GateType::Nand
            | GateType::Nor
            | GateType::Xnor => Some(2),
            GateType::Sink => None,
        }
    }

    pub const fn is_binary(&self) -> bool {
        matches!(self.arity(), Some(2))
    }

    pub const fn name(&self) -> &'static str {
        match self {
            GateType::Input => "INPUT",
            GateType::Output => "OUTPUT",
            GateType::Not => "NOT",
            GateType::And => "AND",
            GateType::Or => "OR",
            GateType::Xor => "XOR",
            GateType::Nand => "NAND",
            GateType::Nor => "NOR",
            GateType::Xnor => "XNOR",
            GateType::Sink => "SINK",
        }
    }

    /// Reduce a binary gate whose operand is the constant `c`.
    ///
    /// Every binary gate here is symmetric, so the position of the constant does not matter.
    pub fn fold(&self, c: bool) -> Option<Folded> {
        if !self.is_binary() {
            return None;
        }
        let f = self.f()?;

        Some(match (f(c, false), f(c, true)) {
            (r0, r1) if r0 == r1 => Folded::Constant(r0),
            (false, true) => Folded::Other,
            _ => Folded::NotOther,
        })
    }
}

impl std::fmt::Display for GateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
