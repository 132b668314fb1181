//! Slot data line decoder
//!
//! A slot data line decodes to one [`SlotRecord`], or to two
//! for turnaround lines. Lines are first normalized to the
//! *separated* layout: the action code in its own position,
//! followed by
//!
//! ```txt
//! designator [designator] period days equipment time/airport [time/airport] service
//! ```
//!
//! The decoder then works on slice patterns over the normalized
//! tokens.

use log::{debug, trace};

use crate::calendar::DaysOfOperation;
use crate::classify::SlotLayout;
use crate::fields::{
    parse_action_code, split_action_code, split_config_aircraft, split_flight_designator,
    split_time_airport, FieldErr, TimeAirport,
};
use crate::message::{slot_key, ActionCode, Leg, Movement, SlotRecord};
use crate::period::{PeriodOfOperation, DEFAULT_REFERENCE_YEAR};

/// Per-line decoding context
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineContext<'a> {
    /// Source line number, starting from 1
    pub line_number: usize,

    /// Clearance airport from the message header, if known
    pub clearance_airport: Option<&'a str>,

    /// Calendar year for validating year-less dates
    pub reference_year: i32,
}

impl<'a> LineContext<'a> {
    /// Context for `line_number`, in the default reference year
    pub fn new(line_number: usize, clearance_airport: Option<&'a str>) -> Self {
        Self {
            line_number,
            clearance_airport,
            reference_year: DEFAULT_REFERENCE_YEAR,
        }
    }
}

// fields shared by every leg of a line
struct Shared<'l> {
    action_code: ActionCode,
    period: PeriodOfOperation,
    days: &'l str,
    configuration: &'l str,
    aircraft_type: &'l str,
}

/// Decode a trimmed slot data line
///
/// `layout` must have been computed for this line by the
/// [`classify()`](crate::classify()). A line whose token count
/// disagrees with `layout` is rejected. No records are returned
/// unless every token decodes.
///
/// ```
/// use scrplace::{decode_slot_line, LineContext, Movement, SlotLayout};
///
/// let ctx = LineContext::new(5, Some("HAM"));
/// let recs = decode_slot_line(
///     "HLH4123 LH4876 01JUL26JUL 0034507 120319 HAM0700 0750FRA JJ",
///     SlotLayout::TurnaroundConsolidated,
///     &ctx,
/// ).unwrap();
///
/// assert_eq!(2, recs.len());
/// assert_eq!(Movement::Departure, recs[0].movement());
/// assert_eq!("4123", recs[0].flight_number());
/// assert_eq!(Movement::Arrival, recs[1].movement());
/// assert_eq!("4876", recs[1].flight_number());
/// ```
pub fn decode_slot_line(
    line: &str,
    layout: SlotLayout,
    ctx: &LineContext<'_>,
) -> Result<Vec<SlotRecord>, FieldErr> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != layout.token_count() {
        return Err(FieldErr::UnexpectedTokenCount(tokens.len()));
    }

    let (action_code, rest) = normalize(&tokens, layout)?;
    trace!(
        "line {}: {} layout, action code {:#}",
        ctx.line_number,
        layout,
        action_code
    );

    let out = match rest.as_slice() {
        [designator, period, days, equipment, time_airport, service] => {
            let shared = shared_fields(action_code, period, days, equipment, ctx)?;
            let (carrier, flight) = split_flight_designator(designator)?;
            let leg = split_time_airport(time_airport)?;
            let service = service_chars(service, 1)?;
            vec![make_record(&shared, carrier, flight, leg, service[0], line, ctx)]
        }
        [designator1, designator2, period, days, equipment, time_airport1, time_airport2, service] =>
        {
            let shared = shared_fields(action_code, period, days, equipment, ctx)?;
            let (carrier1, flight1) = split_flight_designator(designator1)?;
            let (carrier2, flight2) = split_flight_designator(designator2)?;
            let leg1 = split_time_airport(time_airport1)?;
            let leg2 = split_time_airport(time_airport2)?;
            if leg1.movement == leg2.movement {
                return Err(FieldErr::TurnaroundLegs(
                    (*time_airport1).to_owned(),
                    (*time_airport2).to_owned(),
                ));
            }
            let service = service_chars(service, 2)?;
            vec![
                make_record(&shared, carrier1, flight1, leg1, service[0], line, ctx),
                make_record(&shared, carrier2, flight2, leg2, service[1], line, ctx),
            ]
        }
        _ => return Err(FieldErr::UnexpectedTokenCount(tokens.len())),
    };

    for rec in &out {
        debug!("line {}: decoded {}", ctx.line_number, rec);
    }
    Ok(out)
}

// split the action code off, leaving the designator(s) first
fn normalize<'l>(
    tokens: &[&'l str],
    layout: SlotLayout,
) -> Result<(ActionCode, Vec<&'l str>), FieldErr> {
    match tokens {
        [code, rest @ ..] if layout.is_separated() => Ok((parse_action_code(code)?, rest.to_vec())),
        [first, rest @ ..] => {
            let (code, designator) = split_action_code(*first)?;
            let mut out = Vec::with_capacity(tokens.len());
            out.push(designator);
            out.extend_from_slice(rest);
            Ok((code, out))
        }
        [] => Err(FieldErr::UnexpectedTokenCount(0)),
    }
}

fn shared_fields<'l>(
    action_code: ActionCode,
    period: &str,
    days: &'l str,
    equipment: &'l str,
    ctx: &LineContext<'_>,
) -> Result<Shared<'l>, FieldErr> {
    let period = PeriodOfOperation::parse_in_year(period, ctx.reference_year)?;
    let (configuration, aircraft_type) = split_config_aircraft(equipment)?;
    Ok(Shared {
        action_code,
        period,
        days,
        configuration,
        aircraft_type,
    })
}

// one service type letter per leg
fn service_chars(token: &str, legs: usize) -> Result<Vec<char>, FieldErr> {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() != legs {
        return Err(FieldErr::ServiceTypeWidth(token.to_owned(), legs));
    }
    Ok(chars)
}

fn make_record(
    shared: &Shared<'_>,
    carrier: &str,
    flight: &str,
    leg: TimeAirport<'_>,
    service_type: char,
    line: &str,
    ctx: &LineContext<'_>,
) -> SlotRecord {
    let leg_data = match leg.movement {
        Movement::Departure => Leg::Departure {
            airport: leg.airport.to_owned(),
            time: leg.time,
        },
        Movement::Arrival => Leg::Arrival {
            airport: leg.airport.to_owned(),
            time: leg.time,
            day_change: leg.day_change,
        },
    };

    SlotRecord {
        action_code: shared.action_code,
        carrier_code: carrier.to_owned(),
        flight_number: flight.to_owned(),
        period: shared.period,
        days_of_operation: DaysOfOperation::new(shared.days),
        configuration: shared.configuration.to_owned(),
        aircraft_type: shared.aircraft_type.to_owned(),
        service_type,
        leg: leg_data,
        line_number: ctx.line_number,
        raw_line: line.to_owned(),
        slot_key: slot_key(
            carrier,
            flight,
            &shared.period,
            ctx.clearance_airport.unwrap_or(""),
        ),
    }
}
