pub mod unit_economics;
