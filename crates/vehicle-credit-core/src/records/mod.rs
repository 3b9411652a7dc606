pub mod simulation_record;
