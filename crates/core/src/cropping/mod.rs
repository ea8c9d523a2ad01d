pub mod central_square;
