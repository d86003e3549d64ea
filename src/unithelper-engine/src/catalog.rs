// Copyright 2025 The UnitHelper Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! The unit database: an SI-coherent catalog of named units, the SI
//! prefix table, user-registered aliases, and resolution of parsed unit
//! expressions against all three.

use std::collections::HashMap;
use std::fmt;

use crate::ast::UnitExpr;
use crate::common::{Error, ErrorCode, ErrorKind, Result};
use crate::db_err;
use crate::dimension::{DimVector, Dimension};
use crate::parser;
use crate::token;

/// A canonical unit value resolved from an expression. `scale` and
/// `offset` define the affine map to the coherent unit of `vector`'s
/// dimension: `base = value * scale + offset`.
#[derive(Clone, Debug, PartialEq)]
pub struct Unit {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub scale: f64,
    pub offset: f64,
    pub vector: DimVector,
}

impl Unit {
    fn from_def(def: &UnitDef) -> Unit {
        Unit {
            name: Some(def.name.to_string()),
            symbol: def.symbol.map(str::to_string),
            scale: def.scale,
            offset: def.offset,
            vector: def.vector,
        }
    }

    fn factor(scale: f64) -> Unit {
        Unit {
            name: None,
            symbol: None,
            scale,
            offset: 0.0,
            vector: DimVector::new(),
        }
    }

    pub fn dimension(&self) -> Dimension {
        Dimension::classify(&self.vector)
    }

    /// A named unit that coincides with the coherent unit of its
    /// dimension (or the dimensionless unit).
    pub fn is_base(&self) -> bool {
        self.name.is_some()
            && self.scale == 1.0
            && self.offset == 0.0
            && (self.dimension() != Dimension::Unknown || self.vector.is_dimensionless())
    }

    /// The unit's symbol, or one derived from its name by replacing
    /// whitespace with underscores.
    pub fn symbol_or_derived(&self) -> String {
        if let Some(ref symbol) = self.symbol {
            return symbol.clone();
        }
        match self.name {
            Some(ref name) => name
                .chars()
                .map(|c| if c.is_whitespace() { '_' } else { c })
                .collect(),
            None => String::new(),
        }
    }

    /// Renders the unit in terms of the coherent base units, e.g.
    /// `"1000 m"` for a kilometer or `"K @ 273.15"` for degrees Celsius.
    pub fn canonical_expression(&self) -> String {
        let base = base_expression(&self.vector);
        let mut out = if base.is_empty() {
            if self.scale == 1.0 {
                "1".to_string()
            } else {
                self.scale.to_string()
            }
        } else if self.scale == 1.0 {
            base
        } else {
            format!("{} {}", self.scale, base)
        };
        if self.offset != 0.0 {
            out = format!("{} @ {}", out, self.offset);
        }
        out
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.canonical_expression())
    }
}

// coherent base unit symbols, in DimVector index order
const BASE_SYMBOLS: [&str; 9] = ["A", "cd", "K", "kg", "m", "mol", "s", "rad", "sr"];

fn base_expression(vector: &DimVector) -> String {
    let mut parts = Vec::new();
    for (i, exp) in vector.exponents().iter().enumerate() {
        match *exp {
            0 => continue,
            1 => parts.push(BASE_SYMBOLS[i].to_string()),
            exp => parts.push(format!("{}{}", BASE_SYMBOLS[i], exp)),
        }
    }
    parts.join(".")
}

struct Prefix {
    name: &'static str,
    symbol: &'static str,
    factor: f64,
}

const PREFIXES: &[Prefix] = &[
    Prefix { name: "yotta", symbol: "Y", factor: 1e24 },
    Prefix { name: "zetta", symbol: "Z", factor: 1e21 },
    Prefix { name: "exa", symbol: "E", factor: 1e18 },
    Prefix { name: "peta", symbol: "P", factor: 1e15 },
    Prefix { name: "tera", symbol: "T", factor: 1e12 },
    Prefix { name: "giga", symbol: "G", factor: 1e9 },
    Prefix { name: "mega", symbol: "M", factor: 1e6 },
    Prefix { name: "kilo", symbol: "k", factor: 1e3 },
    Prefix { name: "hecto", symbol: "h", factor: 1e2 },
    Prefix { name: "deka", symbol: "da", factor: 1e1 },
    Prefix { name: "deci", symbol: "d", factor: 1e-1 },
    Prefix { name: "centi", symbol: "c", factor: 1e-2 },
    Prefix { name: "milli", symbol: "m", factor: 1e-3 },
    Prefix { name: "micro", symbol: "u", factor: 1e-6 },
    Prefix { name: "nano", symbol: "n", factor: 1e-9 },
    Prefix { name: "pico", symbol: "p", factor: 1e-12 },
    Prefix { name: "femto", symbol: "f", factor: 1e-15 },
    Prefix { name: "atto", symbol: "a", factor: 1e-18 },
    Prefix { name: "zepto", symbol: "z", factor: 1e-21 },
    Prefix { name: "yocto", symbol: "y", factor: 1e-24 },
];

pub(crate) struct UnitDef {
    name: &'static str,
    symbol: Option<&'static str>,
    aliases: &'static [&'static str],
    scale: f64,
    offset: f64,
    vector: DimVector,
}

fn base(
    name: &'static str,
    symbol: Option<&'static str>,
    aliases: &'static [&'static str],
    dim: Dimension,
) -> UnitDef {
    UnitDef {
        name,
        symbol,
        aliases,
        scale: 1.0,
        offset: 0.0,
        vector: DimVector::of(&[(dim, 1)]),
    }
}

fn scaled(
    name: &'static str,
    symbol: Option<&'static str>,
    aliases: &'static [&'static str],
    scale: f64,
    vector: DimVector,
) -> UnitDef {
    UnitDef {
        name,
        symbol,
        aliases,
        scale,
        offset: 0.0,
        vector,
    }
}

fn affine(
    name: &'static str,
    aliases: &'static [&'static str],
    scale: f64,
    offset: f64,
    dim: Dimension,
) -> UnitDef {
    UnitDef {
        name,
        symbol: None,
        aliases,
        scale,
        offset,
        vector: DimVector::of(&[(dim, 1)]),
    }
}

fn si_units() -> Vec<UnitDef> {
    use std::f64::consts::PI;

    use Dimension::*;

    let one = DimVector::new();
    let v = DimVector::of;

    vec![
        // coherent base units
        base("meter", Some("m"), &["metre", "meters", "metres"], Length),
        base("kilogram", Some("kg"), &["kilograms"], Mass),
        base("second", Some("s"), &["seconds", "sec", "secs"], Time),
        base("ampere", Some("A"), &["amperes", "amp", "amps"], ElectricCurrent),
        base("kelvin", Some("K"), &["kelvins", "degK", "degree_K"], Temperature),
        base("mole", Some("mol"), &["moles"], AmountOfSubstance),
        base("candela", Some("cd"), &["candelas"], LuminousIntensity),
        base("radian", Some("rad"), &["radians"], PlaneAngle),
        base("steradian", Some("sr"), &["steradians"], SolidAngle),
        scaled("count", None, &["counts"], 1.0, one),
        // mass
        scaled("gram", Some("g"), &["grams"], 1e-3, v(&[(Mass, 1)])),
        scaled("tonne", Some("t"), &["tonnes", "metric_ton"], 1e3, v(&[(Mass, 1)])),
        scaled("pound", Some("lb"), &["pounds", "lbs"], 0.453_592_37, v(&[(Mass, 1)])),
        scaled("ounce", Some("oz"), &["ounces"], 0.028_349_523_125, v(&[(Mass, 1)])),
        // time
        scaled("minute", Some("min"), &["minutes"], 60.0, v(&[(Time, 1)])),
        scaled("hour", Some("h"), &["hours", "hr", "hrs"], 3600.0, v(&[(Time, 1)])),
        scaled("day", Some("d"), &["days"], 86400.0, v(&[(Time, 1)])),
        scaled("week", None, &["weeks"], 604_800.0, v(&[(Time, 1)])),
        scaled("year", Some("yr"), &["years"], 3.155_692_597_47e7, v(&[(Time, 1)])),
        // length
        scaled("inch", Some("in"), &["inches"], 0.0254, v(&[(Length, 1)])),
        scaled("foot", Some("ft"), &["feet"], 0.3048, v(&[(Length, 1)])),
        scaled("yard", Some("yd"), &["yards"], 0.9144, v(&[(Length, 1)])),
        scaled("mile", Some("mi"), &["miles"], 1609.344, v(&[(Length, 1)])),
        // area
        scaled("hectare", Some("ha"), &["hectares"], 1e4, v(&[(Length, 2)])),
        scaled("are", None, &["ares"], 100.0, v(&[(Length, 2)])),
        // volume
        scaled(
            "liter",
            Some("l"),
            &["litre", "liters", "litres", "L"],
            1e-3,
            v(&[(Length, 3)]),
        ),
        scaled("gallon", None, &["gallons", "gal"], 3.785_411_784e-3, v(&[(Length, 3)])),
        // derived SI units
        scaled("hertz", Some("Hz"), &[], 1.0, v(&[(Time, -1)])),
        scaled("newton", Some("N"), &["newtons"], 1.0, v(&[(Mass, 1), (Length, 1), (Time, -2)])),
        scaled(
            "pascal",
            Some("Pa"),
            &["pascals"],
            1.0,
            v(&[(Mass, 1), (Length, -1), (Time, -2)]),
        ),
        scaled("bar", None, &["bars"], 1e5, v(&[(Mass, 1), (Length, -1), (Time, -2)])),
        scaled("joule", Some("J"), &["joules"], 1.0, v(&[(Mass, 1), (Length, 2), (Time, -2)])),
        scaled("watt", Some("W"), &["watts"], 1.0, v(&[(Mass, 1), (Length, 2), (Time, -3)])),
        // plane angle
        scaled(
            "degree",
            None,
            &["degrees", "arcdeg", "angular_degree"],
            PI / 180.0,
            v(&[(PlaneAngle, 1)]),
        ),
        scaled("arcminute", None, &["arcmin", "arcminutes"], PI / 10_800.0, v(&[(PlaneAngle, 1)])),
        scaled("arcsecond", None, &["arcsec", "arcseconds"], PI / 648_000.0, v(&[(PlaneAngle, 1)])),
        // temperature
        affine(
            "degree Celsius",
            &["celsius", "degC", "degreeC", "degree_C", "degrees_C"],
            1.0,
            273.15,
            Temperature,
        ),
        affine(
            "degree Fahrenheit",
            &["fahrenheit", "degF", "degree_F", "degrees_F"],
            5.0 / 9.0,
            459.67 * 5.0 / 9.0,
            Temperature,
        ),
        // dimensionless
        scaled("percent", Some("%"), &[], 0.01, one),
    ]
}

/// The queryable unit catalog: canonical unit definitions, SI prefixes,
/// and an extensible alias table. Immutable once the process-wide alias
/// registration is done.
pub struct UnitDb {
    units: Vec<UnitDef>,
    by_name: HashMap<&'static str, usize>,
    aliases: HashMap<String, Unit>,
}

impl UnitDb {
    pub fn new() -> Self {
        let units = si_units();
        let mut by_name = HashMap::new();
        for (i, def) in units.iter().enumerate() {
            by_name.insert(def.name, i);
            if let Some(symbol) = def.symbol {
                by_name.insert(symbol, i);
            }
            for &alias in def.aliases {
                by_name.insert(alias, i);
            }
        }

        UnitDb {
            units,
            by_name,
            aliases: HashMap::new(),
        }
    }

    /// Registers an informal name for a canonical unit expression; the
    /// expression `"1"` denotes the dimensionless unit. Fails if the
    /// alias is not a plain identifier, collides with a known name, or
    /// the canonical target does not resolve.
    pub fn add_alias(&mut self, alias: &str, canonical: &str) -> Result<()> {
        let mut chars = alias.chars();
        let valid = match chars.next() {
            Some(c) => token::is_identifier_start(c) && chars.all(token::is_identifier_continue),
            None => false,
        };
        if !valid {
            return db_err!(BadAliasName, alias.to_string());
        }
        if self.aliases.contains_key(alias) || self.by_name.contains_key(alias) {
            return db_err!(DuplicateAlias, alias.to_string());
        }

        let unit = self.parse(canonical)?;
        self.aliases.insert(alias.to_string(), unit);
        Ok(())
    }

    /// Parses a (comment-free, whitespace-free) unit expression into a
    /// resolved `Unit`.
    pub fn parse(&self, expr: &str) -> Result<Unit> {
        match parser::parse(expr) {
            Ok(Some(ast)) => self.resolve_expr(&ast),
            Ok(None) => Err(Error::new(
                ErrorKind::Parse,
                ErrorCode::EmptyExpression,
                None,
            )),
            Err(err) => Err(err.into()),
        }
    }

    /// A restartable iterator over every canonical unit in the catalog,
    /// in catalog order.
    pub fn iter_units(&self) -> impl Iterator<Item = Unit> + '_ {
        self.units.iter().map(Unit::from_def)
    }

    fn resolve_expr(&self, expr: &UnitExpr) -> Result<Unit> {
        match expr {
            UnitExpr::Const(n, _) => Ok(Unit::factor(*n)),
            UnitExpr::Ident(id, _) => self.resolve_ident(id),
            UnitExpr::Mul(l, r, _) => {
                let l = self.resolve_expr(l)?;
                let r = self.resolve_expr(r)?;
                Ok(Unit {
                    name: None,
                    symbol: None,
                    scale: l.scale * r.scale,
                    // offsets are only meaningful standalone
                    offset: 0.0,
                    vector: l.vector * r.vector,
                })
            }
            UnitExpr::Div(l, r, _) => {
                let l = self.resolve_expr(l)?;
                let r = self.resolve_expr(r)?;
                Ok(Unit {
                    name: None,
                    symbol: None,
                    scale: l.scale / r.scale,
                    offset: 0.0,
                    vector: l.vector / r.vector,
                })
            }
            UnitExpr::Exp(e, n, _) => {
                let u = self.resolve_expr(e)?;
                if *n == 1 {
                    Ok(u)
                } else {
                    Ok(Unit {
                        name: None,
                        symbol: None,
                        scale: u.scale.powi(*n),
                        offset: 0.0,
                        vector: u.vector.pow(*n),
                    })
                }
            }
        }
    }

    fn resolve_ident(&self, id: &str) -> Result<Unit> {
        // registered aliases shadow nothing: they are rejected at
        // registration time if they collide with a catalog name
        if let Some(unit) = self.aliases.get(id) {
            return Ok(unit.clone());
        }
        if let Some(unit) = self.lookup_exact(id) {
            return Ok(unit);
        }
        if let Some(unit) = self.lookup_prefixed(id) {
            return Ok(unit);
        }
        db_err!(UnknownUnit, id.to_string())
    }

    fn lookup_exact(&self, id: &str) -> Option<Unit> {
        self.by_name.get(id).map(|&i| Unit::from_def(&self.units[i]))
    }

    fn lookup_prefixed(&self, id: &str) -> Option<Unit> {
        let apply = |prefix: &Prefix, rest: &str| -> Option<Unit> {
            if rest.is_empty() {
                return None;
            }
            let mut unit = self.lookup_exact(rest)?;
            unit.name = None;
            unit.symbol = None;
            unit.scale *= prefix.factor;
            Some(unit)
        };

        // prefix names first ("kilometer"), then symbols ("km");
        // symbol matching takes the longest matching prefix ("dam" is
        // deka-meter, not deci-"am")
        for prefix in PREFIXES {
            if let Some(unit) = id.strip_prefix(prefix.name).and_then(|rest| apply(prefix, rest)) {
                return Some(unit);
            }
        }

        let mut prefixes: Vec<&Prefix> = PREFIXES.iter().collect();
        prefixes.sort_by_key(|p| std::cmp::Reverse(p.symbol.len()));
        for prefix in prefixes {
            if let Some(unit) = id.strip_prefix(prefix.symbol).and_then(|rest| apply(prefix, rest)) {
                return Some(unit);
            }
        }

        None
    }
}

impl Default for UnitDb {
    fn default() -> Self {
        UnitDb::new()
    }
}
