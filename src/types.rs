// 1.0: all the primitives live here. nothing in the engine works without these types.
// team/contract/pick ids, money amounts, budget years. each is a newtype so the compiler catches mixups.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TeamId(String);

impl TeamId {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TeamId {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<TeamId> for String {
    fn from(id: TeamId) -> Self {
        id.0
    }
}

impl From<&str> for TeamId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

// unique per snapshot row. one player can own several rows (active + dead).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ContractId(String);

impl ContractId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ContractId {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<ContractId> for String {
    fn from(id: ContractId) -> Self {
        id.0
    }
}

impl From<&str> for ContractId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct PickId(String);

impl PickId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for PickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PickId {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<PickId> for String {
    fn from(id: PickId) -> Self {
        id.0
    }
}

impl From<&str> for PickId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

// 1.1: anything a team can send in a trade. picks carry no cap charge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetRef {
    Contract(ContractId),
    Pick(PickId),
}

impl AssetRef {
    pub fn contract(id: impl AsRef<str>) -> Self {
        Self::Contract(ContractId::new(id))
    }

    pub fn pick(id: impl AsRef<str>) -> Self {
        Self::Pick(PickId::new(id))
    }

    pub fn as_contract(&self) -> Option<&ContractId> {
        match self {
            AssetRef::Contract(id) => Some(id),
            AssetRef::Pick(_) => None,
        }
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetRef::Contract(id) => write!(f, "contract {id}"),
            AssetRef::Pick(id) => write!(f, "pick {id}"),
        }
    }
}

// 1.2: cap money. salary, dead money, fines, remaining all use this.
// sums are exact decimal adds so evaluation order never changes a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    pub const SCALE: u32 = 1;

    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    // feed values arrive as floats. round once at the boundary, never again.
    pub fn from_f64(value: f64) -> Self {
        let value = Decimal::from_f64(value).unwrap_or(Decimal::ZERO);
        Self(value.round_dp(Self::SCALE))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    pub fn add(&self, other: Amount) -> Self {
        Self(self.0 + other.0)
    }

    pub fn sub(&self, other: Amount) -> Self {
        Self(self.0 - other.0)
    }

    pub fn mul(&self, factor: Decimal) -> Self {
        Self(self.0 * factor)
    }

    pub fn round_to_scale(&self) -> Self {
        Self(self.0.round_dp(Self::SCALE))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-${:.1}", self.0.abs())
        } else {
            write!(f, "${:.1}", self.0)
        }
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl PartialOrd for Amount {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Amount {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, a| acc.add(a))
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, a| acc.add(*a))
    }
}

// 1.3: the four budget years. Y1 is the current league year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BudgetYear {
    Y1,
    Y2,
    Y3,
    Y4,
}

impl BudgetYear {
    pub const ALL: [BudgetYear; 4] = [BudgetYear::Y1, BudgetYear::Y2, BudgetYear::Y3, BudgetYear::Y4];

    pub fn index(&self) -> usize {
        match self {
            BudgetYear::Y1 => 0,
            BudgetYear::Y2 => 1,
            BudgetYear::Y3 => 2,
            BudgetYear::Y4 => 3,
        }
    }

    pub fn is_current(&self) -> bool {
        matches!(self, BudgetYear::Y1)
    }

    pub fn future() -> impl Iterator<Item = BudgetYear> {
        Self::ALL.into_iter().filter(|y| !y.is_current())
    }
}

impl fmt::Display for BudgetYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Y{}", self.index() + 1)
    }
}

// 1.4: one amount per budget year. salary rows, dead money rows and fines all use this shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct YearAmounts([Amount; 4]);

impl YearAmounts {
    pub fn new(values: [Amount; 4]) -> Self {
        Self(values)
    }

    pub fn zero() -> Self {
        Self([Amount::zero(); 4])
    }

    pub fn from_f64(values: [f64; 4]) -> Self {
        Self(values.map(Amount::from_f64))
    }

    pub fn from_decimals(values: [Decimal; 4]) -> Self {
        Self(values.map(Amount::new))
    }

    pub fn get(&self, year: BudgetYear) -> Amount {
        self.0[year.index()]
    }

    pub fn set(&mut self, year: BudgetYear, amount: Amount) {
        self.0[year.index()] = amount;
    }

    pub fn add(&self, other: &YearAmounts) -> Self {
        let mut out = *self;
        for year in BudgetYear::ALL {
            out.set(year, self.get(year).add(other.get(year)));
        }
        out
    }

    pub fn sub(&self, other: &YearAmounts) -> Self {
        let mut out = *self;
        for year in BudgetYear::ALL {
            out.set(year, self.get(year).sub(other.get(year)));
        }
        out
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(Amount::is_zero)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BudgetYear, Amount)> + '_ {
        BudgetYear::ALL.into_iter().map(move |y| (y, self.get(y)))
    }
}

impl Sum for YearAmounts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, y| acc.add(&y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn amount_rounds_floats_once() {
        assert_eq!(Amount::from_f64(12.34).value(), dec!(12.3));
        assert_eq!(Amount::from_f64(0.1).add(Amount::from_f64(0.2)).value(), dec!(0.3));
        assert_eq!(Amount::from_f64(f64::NAN), Amount::zero());
    }

    #[test]
    fn amount_display() {
        assert_eq!(Amount::new(dec!(15)).to_string(), "$15.0");
        assert_eq!(Amount::new(dec!(-15)).to_string(), "-$15.0");
    }

    #[test]
    fn budget_year_order() {
        assert_eq!(BudgetYear::Y3.index(), 2);
        assert_eq!(BudgetYear::Y4.to_string(), "Y4");
        assert_eq!(BudgetYear::future().count(), 3);
    }

    #[test]
    fn year_amounts_arithmetic() {
        let a = YearAmounts::from_decimals([dec!(10), dec!(5), dec!(0), dec!(1)]);
        let b = YearAmounts::from_decimals([dec!(2.5), dec!(5), dec!(1), dec!(0)]);
        let sum = a.add(&b);
        assert_eq!(sum.get(BudgetYear::Y1).value(), dec!(12.5));
        assert_eq!(a.sub(&b).get(BudgetYear::Y3).value(), dec!(-1));
        assert!(a.sub(&a).is_zero());
    }

    #[test]
    fn ids_are_trimmed() {
        assert_eq!(TeamId::new("  Alpha "), TeamId::from("Alpha"));
        assert!(TeamId::new("   ").is_blank());
        assert!(ContractId::new("").is_blank());

        let parsed: TeamId = serde_json::from_str(r#"" Alpha ""#).unwrap();
        assert_eq!(parsed, TeamId::new("Alpha"));
        let blank: PickId = serde_json::from_str(r#""   ""#).unwrap();
        assert!(blank.is_blank());
    }
}
