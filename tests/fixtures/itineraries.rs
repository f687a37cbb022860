//! Realistic itineraries using IATA airport codes.

/// Connecting one-way trip: Boston to Honolulu via Chicago and San Francisco.
pub const BOS_TO_HNL: &[(&str, &str)] = &[("BOS", "ORD"), ("ORD", "SFO"), ("SFO", "HNL")];

/// Round trip Denver - Tokyo via Seattle, flattened into one ordered list.
pub const DEN_NRT_ROUND_TRIP: &[(&str, &str)] = &[
    ("DEN", "SEA"),
    ("SEA", "NRT"),
    ("NRT", "SEA"),
    ("SEA", "DEN"),
];

/// Two feeder flights merging into a single long-haul leg.
pub const MERGING_FEEDERS: &[(&str, &str)] = &[("PHL", "JFK"), ("EWR", "JFK"), ("JFK", "LHR")];

/// A shuttle that only goes back and forth.
pub const SHUTTLE_CYCLE: &[(&str, &str)] = &[("LGA", "DCA"), ("DCA", "LGA")];

/// Itinerary export in the airline back-office column layout.
pub const EXPORT_CSV: &str = "\
Order #,Passenger,Date,BP Origin,BP Destination,Barcode,Customer Email
A-100,Maria Silva,2024-06-01,ORD,SFO,2,maria@example.com
A-100,Maria Silva,2024-06-01,BOS,ORD,1,maria@example.com
A-100,Maria Silva,2024-06-01,SFO,HNL,3,maria@example.com
A-101,Ken Ito,2024-06-03,DEN,SEA,1,KEN@example.com
A-101,Ken Ito,2024-06-03,SEA,NRT,2,ken@example.com
A-101,Ken Ito,2024-06-10,NRT,SEA,3,ken@example.com
A-101,Ken Ito,2024-06-10,SEA,DEN,4,ken@example.com
A-102,Lea Roth,2024-06-05,FRA,,1,lea@example.com
";

pub const CUSTOMERS_CSV: &str = "\
Has Acct,Name,E-mail Address,Created,Sales Amt.,Address 1,Address2,City,State,ZIP,Phone,Cell Phone
Y,Maria Silva,maria@example.com,2021-01-04,1200,1 Main St,,Chicago,IL,60601,555-0100,555-0101
Y,Ken Ito,ken@example.com,2022-03-09,3400,9 Pine Rd,Apt 2,Denver,CO,80202,555-0200,
";
